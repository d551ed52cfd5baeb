//! Save functionality for learned merge rules.

use super::format::{ModelFormat, SavedMerges, TEXT_HEADER};
use log::info;
use pairmerge_core::{MergeRules, NormalizationForm, Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Merges saver - writes a rule list and its pre-tokenization settings.
pub struct MergesSaver<'a> {
    /// Merge rules reference
    merges: &'a MergeRules,
    normalization: NormalizationForm,
    split_pattern: Option<&'a str>,
}

impl<'a> MergesSaver<'a> {
    /// Create a saver with default pre-tokenization settings.
    pub fn new(merges: &'a MergeRules) -> Self {
        Self {
            merges,
            normalization: NormalizationForm::None,
            split_pattern: None,
        }
    }

    /// Record the normalization the rules were trained with.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.normalization = form;
        self
    }

    /// Record the split regex the rules were trained with.
    pub fn split_pattern(mut self, pattern: Option<&'a str>) -> Self {
        self.split_pattern = pattern;
        self
    }

    /// Save into directory `dir` in the given format and return the file
    /// written.
    pub fn save_as(&self, dir: &Path, format: ModelFormat) -> Result<PathBuf> {
        match format {
            ModelFormat::Json => self.save(dir),
            ModelFormat::Text => self.save_text(dir),
        }
    }

    /// Save `merges.json` into directory `dir`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| TokenizerError::io(dir, e))?;

        let file_path = dir.join(ModelFormat::Json.file_name());
        let file = File::create(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize merges: {}", e)))?;

        info!(
            "Saved {} merge rules to {}",
            self.merges.len(),
            file_path.display()
        );
        Ok(file_path)
    }

    /// Save `merges.txt` into directory `dir`.
    ///
    /// The text format cannot represent symbols containing whitespace, and
    /// it does not record pre-tokenization settings.
    pub fn save_text(&self, dir: &Path) -> Result<PathBuf> {
        if let Some(rule) = self.merges.iter().find(|r| {
            r.pair.first.contains(char::is_whitespace)
                || r.pair.second.contains(char::is_whitespace)
        }) {
            return Err(TokenizerError::Save(format!(
                "rule at rank {} contains whitespace and cannot be written as text",
                rule.rank
            )));
        }

        std::fs::create_dir_all(dir).map_err(|e| TokenizerError::io(dir, e))?;

        let file_path = dir.join(ModelFormat::Text.file_name());
        let file = File::create(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;
        let mut writer = BufWriter::new(file);

        let write_err = |e: std::io::Error| TokenizerError::io(&file_path, e);
        writeln!(writer, "{} {}", TEXT_HEADER, env!("CARGO_PKG_VERSION")).map_err(write_err)?;
        for rule in self.merges {
            writeln!(writer, "{} {}", rule.pair.first, rule.pair.second).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        info!(
            "Saved {} merge rules to {}",
            self.merges.len(),
            file_path.display()
        );
        Ok(file_path)
    }

    /// Serialize the rules to the JSON structure.
    fn serialize(&self) -> SavedMerges {
        SavedMerges {
            version: env!("CARGO_PKG_VERSION").to_string(),
            normalization: self.normalization,
            split_pattern: self.split_pattern.map(str::to_string),
            merges: self.merges.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmerge_core::SymbolPair;

    #[test]
    fn test_serialize() {
        let merges = MergeRules::from_pairs(vec![SymbolPair::new("a", "b")]);
        let saver = MergesSaver::new(&merges)
            .normalization(NormalizationForm::NFC)
            .split_pattern(Some(","));
        let serialized = saver.serialize();

        assert_eq!(serialized.merges, merges);
        assert_eq!(serialized.normalization, NormalizationForm::NFC);
        assert_eq!(serialized.split_pattern.as_deref(), Some(","));
        assert_eq!(serialized.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_save_text_layout() {
        let dir = tempfile::tempdir().unwrap();
        let merges = MergeRules::from_pairs(vec![
            SymbolPair::new("<", "H"),
            SymbolPair::new("<H", "e"),
        ]);

        let path = MergesSaver::new(&merges).save_text(dir.path()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert!(lines[0].starts_with(TEXT_HEADER));
        assert_eq!(&lines[1..], &["< H", "<H e"]);
    }

    #[test]
    fn test_save_text_rejects_whitespace_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let merges = MergeRules::from_pairs(vec![SymbolPair::new("a", " ")]);

        let err = MergesSaver::new(&merges).save_text(dir.path()).unwrap_err();
        assert!(matches!(err, TokenizerError::Save(_)));
    }
}
