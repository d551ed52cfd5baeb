//! Pairmerge-training - BPE merge learning
//!
//! This crate learns an ordered list of merge rules from a text corpus by
//! repeatedly merging the most frequent adjacent symbol pair.
//!
//! # Features
//!
//! - Incrementally maintained pair-frequency table
//! - Deterministic tie-breaking (smallest pair wins among equal counts)
//! - Optional parallel initial pair count
//! - Progress callback with early stop
//!
//! # Example
//!
//! ```rust
//! use pairmerge_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder()
//!     .max_merges(3)
//!     .build()?;
//!
//! let output = BpeTrainer::new(config)?.train("Hello There")?;
//! assert_eq!(output.merges.len(), 3);
//! assert_eq!(output.merges.get(0).unwrap().merged, "<H");
//! # Ok::<(), pairmerge_training::TokenizerError>(())
//! ```

pub use pairmerge_core::{MergeRule, MergeRules, Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    learn, BpeTrainer, Corpus, MergeEffect, PairTable, StopReason, TrainingConfig,
    TrainingConfigBuilder, TrainingOutput, TrainingStats, DEFAULT_MAX_MERGES,
};
