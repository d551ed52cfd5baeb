//! Persistence of learned merge rules.
//!
//! This module saves and loads rule lists as JSON (`merges.json`) or as a
//! plain-text pair list (`merges.txt`).

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SavedMerges};
pub use load::MergesLoader;
pub use save::MergesSaver;
