//! Core BPE data structures.
//!
//! This module contains the symbol, word and merge-rule types shared by
//! training and segmentation.

pub mod merges;
pub mod priority;
pub mod symbol;
pub mod word;

pub use merges::{MergeRule, MergeRules, MergeStats};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use symbol::{Symbol, SymbolPair, WORD_END, WORD_START};
pub use word::Word;
