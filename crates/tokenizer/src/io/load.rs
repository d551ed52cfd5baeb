//! Load functionality for learned merge rules.

use super::format::{ModelFormat, SavedMerges, TEXT_HEADER};
use log::warn;
use pairmerge_core::{MergeRules, Result, SymbolPair, TokenizerError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Merges loader - reads rule lists written by [`MergesSaver`](super::MergesSaver).
pub struct MergesLoader;

impl MergesLoader {
    /// Load from a directory or a file.
    ///
    /// A directory is searched for `merges.json`, then `merges.txt`. A file
    /// ending in `.txt` is read as text, anything else as JSON.
    pub fn load_path(path: &Path) -> Result<SavedMerges> {
        if path.is_dir() {
            let json = path.join(ModelFormat::Json.file_name());
            if json.is_file() {
                return Self::load_json_file(&json);
            }
            let text = path.join(ModelFormat::Text.file_name());
            if text.is_file() {
                return Self::load_text_file(&text).map(SavedMerges::new);
            }
            return Err(TokenizerError::Load(format!(
                "no {} or {} in {}",
                ModelFormat::Json.file_name(),
                ModelFormat::Text.file_name(),
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Self::load_text_file(path).map(SavedMerges::new),
            _ => Self::load_json_file(path),
        }
    }

    /// Load `merges.json` from directory `dir`.
    pub fn load(dir: &Path) -> Result<SavedMerges> {
        Self::load_json_file(&dir.join(ModelFormat::Json.file_name()))
    }

    /// Load `merges.txt` from directory `dir`.
    pub fn load_text(dir: &Path) -> Result<MergeRules> {
        Self::load_text_file(&dir.join(ModelFormat::Text.file_name()))
    }

    fn load_json_file(file_path: &Path) -> Result<SavedMerges> {
        let file = File::open(file_path).map_err(|e| TokenizerError::io(file_path, e))?;

        let reader = BufReader::new(file);
        let saved: SavedMerges = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize merges: {}", e)))?;

        if saved.version != env!("CARGO_PKG_VERSION") {
            warn!(
                "{} was written by version {} (running {})",
                file_path.display(),
                saved.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(saved)
    }

    fn load_text_file(file_path: &Path) -> Result<MergeRules> {
        let content =
            std::fs::read_to_string(file_path).map_err(|e| TokenizerError::io(file_path, e))?;
        Self::parse_text(&content)
    }

    /// Parse the text format: an optional `#version` header, then one
    /// `first second` pair per line. Blank lines are skipped.
    pub fn parse_text(content: &str) -> Result<MergeRules> {
        let mut pairs = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            // Only the first line can be a header; "#" is a legal symbol.
            if line_num == 0 && line.starts_with("#version") {
                if !line.starts_with(TEXT_HEADER) {
                    warn!("unrecognised header in merges file: {:?}", line);
                }
                continue;
            }

            let parts: Vec<&str> = line.split(' ').collect();
            if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
                return Err(TokenizerError::Load(format!(
                    "Invalid merge format at line {}: '{}'",
                    line_num + 1,
                    line
                )));
            }

            pairs.push(SymbolPair::new(parts[0], parts[1]));
        }

        Ok(MergeRules::from_pairs(pairs))
    }
}
