//! Pairmerge-core - Core data structures for byte-pair-encoding merge rules
//!
//! This crate provides the building blocks shared by the merge learner and the
//! segmenter: symbols and symbol pairs, word representations bounded by
//! start/end markers, ordered merge rule lists, the pair priority queue, and
//! the pre-tokenization pipeline that turns raw text into words.
//!
//! # Example
//!
//! ```rust
//! use pairmerge_core::{MergeRules, SymbolPair, Word};
//!
//! let mut rules = MergeRules::new();
//! rules.push(SymbolPair::new("l", "l"));
//!
//! let mut word = Word::from_text("hello");
//! word.apply_rules(&rules);
//! assert_eq!(word.to_strings(), vec!["<", "h", "e", "ll", "o", ">"]);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core merge-rule data structures
pub mod core;
pub use core::{
    MergeCandidate, MergeRule, MergeRules, MergeStats, PairPriorityQueue, Symbol, SymbolPair,
    Word, WORD_END, WORD_START,
};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{NormalizationForm, Normalizer, PreTokenizer, Splitter};
