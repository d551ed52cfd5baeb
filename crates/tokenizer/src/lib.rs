//! Pairmerge-tokenizer - apply learned merge rules to new text
//!
//! This crate sits on top of `pairmerge-training`: rules learned there are
//! saved to disk, loaded back, and replayed on unseen words.
//!
//! # Features
//!
//! - Single-word segmentation with [`segment`]
//! - A reusable [`Segmenter`] with word cache and parallel batches
//! - Loading and saving rules as `merges.json` or `merges.txt`
//!
//! # Example
//!
//! ```rust
//! use pairmerge_tokenizer::{segment, Segmenter};
//! use pairmerge_training::learn;
//!
//! let rules = learn("Hello There", 3)?;
//! assert_eq!(segment("Hello", &rules), ["<He", "l", "l", "o", ">"]);
//!
//! let segmenter = Segmenter::new(rules);
//! let words = segmenter.segment_text("Hello There");
//! assert_eq!(words.len(), 2);
//! # Ok::<(), pairmerge_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use pairmerge_core::{MergeRules, Result, Symbol, TokenizerError};

// Segmentation API
pub mod segmenter;
pub use segmenter::{apply_rules, segment, Segmenter, SegmenterBuilder, SegmenterConfig};

// IO/Serialization
pub mod io;
pub use io::{MergesLoader, MergesSaver, ModelFormat, SavedMerges};

// Utilities
pub mod utils;
pub use utils::{CacheStats, SegmentationCache};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
