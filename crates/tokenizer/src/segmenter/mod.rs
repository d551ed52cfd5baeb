//! Word segmentation with learned merge rules.
//!
//! This module provides the high-level `Segmenter` that applies an ordered
//! rule list to new text, plus the [`segment`] and [`apply_rules`] free
//! functions for one-off use.

use crate::io::{MergesLoader, SavedMerges};
use crate::utils::SegmentationCache;
use log::debug;
use pairmerge_core::{MergeRules, NormalizationForm, PreTokenizer, Result, Symbol, Word};
use rayon::prelude::*;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Segment a single word into subword symbols.
///
/// The word is trimmed, expanded to `[<] + chars + [>]`, and every rule is
/// applied in ascending rank order. Rules that never match are skipped, so a
/// rule list from an unrelated corpus degrades to per-character output. A
/// word that is empty after trimming yields no symbols.
pub fn segment(word: &str, rules: &MergeRules) -> Vec<Symbol> {
    let word = word.trim();
    if word.is_empty() {
        return Vec::new();
    }

    let mut repr = Word::from_text(word);
    repr.apply_rules(rules);
    repr.into_symbols()
}

/// Apply `rules` in rank order to an existing symbol sequence.
///
/// Symbols are treated as atomic; no markers are added.
pub fn apply_rules(symbols: Vec<Symbol>, rules: &MergeRules) -> Vec<Symbol> {
    let mut repr = Word::from_symbols(symbols);
    repr.apply_rules(rules);
    repr.into_symbols()
}

/// Configuration for building a segmenter.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Unicode normalization applied before splitting text
    pub normalization: NormalizationForm,
    /// Regex to split words on; whitespace when `None`
    pub split_pattern: Option<String>,
    /// Capacity of the per-word cache (0 disables it)
    pub cache_capacity: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationForm::None,
            split_pattern: None,
            cache_capacity: 1000,
        }
    }
}

/// Builder for creating a segmenter.
#[derive(Debug, Clone)]
pub struct SegmenterBuilder {
    rules: MergeRules,
    config: SegmenterConfig,
}

impl SegmenterBuilder {
    /// Create a builder for `rules` with default configuration.
    pub fn new(rules: MergeRules) -> Self {
        Self {
            rules,
            config: SegmenterConfig::default(),
        }
    }

    /// Set the normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.config.normalization = form;
        self
    }

    /// Split text on `pattern` instead of whitespace.
    pub fn split_pattern(mut self, pattern: Option<String>) -> Self {
        self.config.split_pattern = pattern;
        self
    }

    /// Set the cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build the segmenter.
    pub fn build(self) -> Result<Segmenter> {
        Segmenter::with_config(self.rules, self.config)
    }
}

/// Applies a frozen rule list to text.
///
/// The rule list is shared read-only, so a segmenter can be used from many
/// threads; only the cache is behind a lock.
#[derive(Debug)]
pub struct Segmenter {
    /// Merge rules in rank order
    rules: Arc<MergeRules>,
    /// Configuration
    config: SegmenterConfig,
    /// Text to words
    pre_tokenizer: PreTokenizer,
    /// word -> segmentation
    cache: Mutex<SegmentationCache>,
}

impl Segmenter {
    /// Create a segmenter with default configuration.
    pub fn new(rules: MergeRules) -> Self {
        let config = SegmenterConfig::default();
        Self {
            rules: Arc::new(rules),
            cache: Mutex::new(SegmentationCache::with_capacity(config.cache_capacity)),
            pre_tokenizer: PreTokenizer::default(),
            config,
        }
    }

    /// Create a segmenter builder.
    pub fn builder(rules: MergeRules) -> SegmenterBuilder {
        SegmenterBuilder::new(rules)
    }

    /// Create a segmenter with the given configuration.
    pub fn with_config(rules: MergeRules, config: SegmenterConfig) -> Result<Self> {
        let pre_tokenizer =
            PreTokenizer::from_config(config.normalization, config.split_pattern.as_deref())?;
        Ok(Self {
            rules: Arc::new(rules),
            cache: Mutex::new(SegmentationCache::with_capacity(config.cache_capacity)),
            pre_tokenizer,
            config,
        })
    }

    /// Create a segmenter that splits and normalizes text the same way the
    /// saved rules were trained.
    pub fn from_saved(saved: SavedMerges) -> Result<Self> {
        Self::builder(saved.merges)
            .normalization(saved.normalization)
            .split_pattern(saved.split_pattern)
            .build()
    }

    /// Load rules from a directory or file and build a segmenter.
    pub fn load(path: &Path) -> Result<Self> {
        let saved = MergesLoader::load_path(path)?;
        debug!(
            "Loaded {} merge rules from {}",
            saved.merges.len(),
            path.display()
        );
        Self::from_saved(saved)
    }

    /// The rule list.
    pub fn rules(&self) -> &MergeRules {
        &self.rules
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment one word, using the cache when enabled.
    pub fn segment_word(&self, word: &str) -> Vec<Symbol> {
        if self.config.cache_capacity == 0 {
            return segment(word, &self.rules);
        }

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get_or_segment(word, |w| segment(w, &self.rules))
    }

    /// Split `text` into words and segment each, in order.
    pub fn segment_text(&self, text: &str) -> Vec<Vec<Symbol>> {
        let mut out = Vec::new();
        self.pre_tokenizer
            .for_each_word(text, |word| out.push(self.segment_word(word)));
        out
    }

    /// Segment many texts in parallel.
    ///
    /// Bypasses the cache; each text is independent and the rule list is
    /// only read.
    pub fn segment_batch<S>(&self, texts: &[S]) -> Vec<Vec<Vec<Symbol>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| {
                let mut out = Vec::new();
                self.pre_tokenizer
                    .for_each_word(text.as_ref(), |word| out.push(segment(word, &self.rules)));
                out
            })
            .collect()
    }

    /// Count how many symbols `text` segments into.
    pub fn count_symbols(&self, text: &str) -> usize {
        self.segment_text(text).iter().map(Vec::len).sum()
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> crate::utils::CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .stats()
    }
}
