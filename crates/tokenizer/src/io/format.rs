//! On-disk formats for learned merge rules.
//!
//! Two layouts are supported:
//! - `merges.json`: the full rule list plus the pre-tokenization settings it
//!   was trained with
//! - `merges.txt`: one `first second` pair per line in rank order

use pairmerge_core::{MergeRules, NormalizationForm};
use serde::{Deserialize, Serialize};

/// File name of the JSON format.
pub const JSON_FILE: &str = "merges.json";

/// File name of the plain-text format.
pub const TEXT_FILE: &str = "merges.txt";

/// Header written at the top of `merges.txt`.
pub const TEXT_HEADER: &str = "#version: pairmerge";

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `merges.json`
    Json,
    /// `merges.txt`
    Text,
}

impl ModelFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Json => JSON_FILE,
            Self::Text => TEXT_FILE,
        }
    }
}

/// Complete serialization format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMerges {
    /// Crate version that wrote the file
    pub version: String,
    /// Normalization applied during training
    #[serde(default)]
    pub normalization: NormalizationForm,
    /// Split regex used during training; whitespace when absent
    #[serde(default)]
    pub split_pattern: Option<String>,
    /// Merge rules in rank order
    pub merges: MergeRules,
}

impl SavedMerges {
    /// Wrap `merges` with default pre-tokenization settings.
    pub fn new(merges: MergeRules) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            normalization: NormalizationForm::None,
            split_pattern: None,
            merges,
        }
    }
}
