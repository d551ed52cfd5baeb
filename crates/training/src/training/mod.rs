//! Training infrastructure for BPE merge rules.
//!
//! The corpus owns the words, the pair table counts their adjacent pairs,
//! and the trainer drives the merge loop.

pub mod corpus;
pub mod table;
pub mod trainer;

pub use corpus::Corpus;
pub use table::{MergeEffect, PairTable};
pub use trainer::{
    learn, BpeTrainer, StopReason, TrainingConfig, TrainingConfigBuilder, TrainingOutput,
    TrainingStats, DEFAULT_MAX_MERGES,
};
