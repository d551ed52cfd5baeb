//! BPE merge learner.
//!
//! Repeatedly selects the most frequent adjacent pair, records it as the
//! next merge rule and applies it to every word that contains it. Each
//! iteration reads the same incrementally updated [`PairTable`].

use super::corpus::Corpus;
use super::table::PairTable;
use log::{debug, info};
use pairmerge_core::{
    MergeRule, MergeRules, NormalizationForm, PreTokenizer, Result, TokenizerError,
};
use std::ops::ControlFlow;

/// Number of merges learned when none is configured.
pub const DEFAULT_MAX_MERGES: usize = 3;

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Upper bound on the number of merge rules to learn
    pub max_merges: usize,
    /// Minimum count for a pair to be merged
    pub min_frequency: u64,
    /// Whether to count initial pairs in parallel
    pub parallel: bool,
    /// Unicode normalization applied before splitting
    pub normalization: NormalizationForm,
    /// Regex to split words on; whitespace when `None`
    pub split_pattern: Option<String>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_merges: DEFAULT_MAX_MERGES,
            min_frequency: 1,
            parallel: false,
            normalization: NormalizationForm::None,
            split_pattern: None,
        }
    }
}

impl TrainingConfig {
    /// Create a configuration builder.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }
}

/// Builder for [`TrainingConfig`] that validates caller input.
#[derive(Debug, Clone)]
pub struct TrainingConfigBuilder {
    max_merges: i64,
    min_frequency: u64,
    parallel: bool,
    normalization: NormalizationForm,
    split_pattern: Option<String>,
}

impl Default for TrainingConfigBuilder {
    fn default() -> Self {
        let defaults = TrainingConfig::default();
        Self {
            max_merges: defaults.max_merges as i64,
            min_frequency: defaults.min_frequency,
            parallel: defaults.parallel,
            normalization: defaults.normalization,
            split_pattern: defaults.split_pattern,
        }
    }
}

impl TrainingConfigBuilder {
    /// Set the maximum number of merges. Negative values are rejected by
    /// [`build`](Self::build).
    pub fn max_merges(mut self, max_merges: i64) -> Self {
        self.max_merges = max_merges;
        self
    }

    /// Set the minimum pair count required to keep merging.
    pub fn min_frequency(mut self, min_frequency: u64) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Count initial pairs in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.normalization = form;
        self
    }

    /// Split words on `pattern` instead of whitespace.
    pub fn split_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.split_pattern = Some(pattern.into());
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        if self.max_merges < 0 {
            return Err(TokenizerError::InvalidArgument(format!(
                "max_merges must be >= 0, got {}",
                self.max_merges
            )));
        }
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidArgument(
                "min_frequency must be >= 1".to_string(),
            ));
        }
        // Surface a bad regex here rather than at training time.
        PreTokenizer::from_config(self.normalization, self.split_pattern.as_deref())?;

        let max_merges = usize::try_from(self.max_merges).map_err(|_| {
            TokenizerError::InvalidArgument(format!(
                "max_merges {} does not fit in usize",
                self.max_merges
            ))
        })?;

        Ok(TrainingConfig {
            max_merges,
            min_frequency: self.min_frequency,
            parallel: self.parallel,
            normalization: self.normalization,
            split_pattern: self.split_pattern,
        })
    }
}

/// Why the merge loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_merges` rules were learned
    MaxMergesReached,
    /// No adjacent pairs remain in the corpus
    TableExhausted,
    /// The best remaining pair is below `min_frequency`
    BelowMinFrequency,
    /// The progress callback asked to stop
    Aborted,
}

/// Summary numbers for a training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingStats {
    /// Unique words in the corpus
    pub unique_words: usize,
    /// Word occurrences in the corpus
    pub total_words: u64,
    /// Distinct pairs before the first merge
    pub initial_pairs: usize,
    /// Distinct pairs left after the last merge
    pub remaining_pairs: usize,
    /// Pair occurrences merged across all ranks
    pub merged_occurrences: u64,
}

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainingOutput {
    /// Learned rules in rank order
    pub merges: MergeRules,
    pub stop_reason: StopReason,
    pub stats: TrainingStats,
}

/// BPE trainer.
///
/// Trains merge rules from text by iteratively merging the most frequent
/// adjacent symbol pair.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
    /// Text to words
    pre_tokenizer: PreTokenizer,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        let pre_tokenizer =
            PreTokenizer::from_config(config.normalization, config.split_pattern.as_deref())?;
        Ok(Self {
            config,
            pre_tokenizer,
        })
    }

    /// Create a trainer with default settings and the given merge budget.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self {
            config: TrainingConfig {
                max_merges,
                ..Default::default()
            },
            pre_tokenizer: PreTokenizer::default(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on `text`.
    pub fn train(&self, text: &str) -> Result<TrainingOutput> {
        self.train_with(text, |_, _| ControlFlow::Continue(()))
    }

    /// Train on `text`, calling `on_merge` after each rule has been applied
    /// to the whole corpus.
    ///
    /// The callback receives the rule and the pair count it was selected
    /// with. Returning `ControlFlow::Break` stops training; the rule just
    /// reported is kept, and no later rank is started.
    pub fn train_with<F>(&self, text: &str, on_merge: F) -> Result<TrainingOutput>
    where
        F: FnMut(&MergeRule, u64) -> ControlFlow<()>,
    {
        if self.config.max_merges == 0 {
            return Ok(TrainingOutput {
                merges: MergeRules::new(),
                stop_reason: StopReason::MaxMergesReached,
                stats: TrainingStats::default(),
            });
        }

        let corpus = Corpus::from_text_with(text, &self.pre_tokenizer);
        Ok(self.train_corpus(corpus, on_merge))
    }

    /// Run the merge loop over an already built corpus.
    pub fn train_corpus<F>(&self, mut corpus: Corpus, mut on_merge: F) -> TrainingOutput
    where
        F: FnMut(&MergeRule, u64) -> ControlFlow<()>,
    {
        let max_merges = self.config.max_merges;
        let mut stats = TrainingStats {
            unique_words: corpus.word_count(),
            total_words: corpus.total_word_occurrences(),
            ..Default::default()
        };
        let mut merges = MergeRules::with_capacity(max_merges.min(4096));

        if max_merges == 0 {
            return TrainingOutput {
                merges,
                stop_reason: StopReason::MaxMergesReached,
                stats,
            };
        }

        info!(
            "Starting BPE training: up to {} merges over {} unique words ({} total)",
            max_merges, stats.unique_words, stats.total_words
        );

        let mut table = if self.config.parallel {
            PairTable::from_corpus_parallel(&corpus)
        } else {
            PairTable::from_corpus(&corpus)
        };
        stats.initial_pairs = table.len();
        info!("Counted {} distinct pairs", stats.initial_pairs);

        let mut stop_reason = StopReason::MaxMergesReached;
        let mut last_log_percent = 0;

        while merges.len() < max_merges {
            if table.is_empty() {
                stop_reason = StopReason::TableExhausted;
                break;
            }
            let Some(best) = table.pop_best() else {
                stop_reason = StopReason::TableExhausted;
                break;
            };
            if best.count < self.config.min_frequency {
                stop_reason = StopReason::BelowMinFrequency;
                break;
            }

            let rule = merges.push(best.pair).clone();
            let effect = table.apply_merge(&mut corpus, &rule.pair, &rule.merged);
            stats.merged_occurrences += effect.occurrences;

            debug!(
                "rank {} merged {} -> {:?} (count {}, {} words)",
                rule.rank,
                rule.pair,
                rule.merged.as_str(),
                best.count,
                effect.words_touched
            );

            let percent = merges.len() * 100 / max_merges;
            if max_merges >= 10 && percent / 10 > last_log_percent / 10 {
                info!(
                    "Progress: {}% ({}/{} merges), {} distinct pairs left",
                    percent,
                    merges.len(),
                    max_merges,
                    table.len()
                );
                last_log_percent = percent;
            }

            if on_merge(&rule, best.count).is_break() {
                stop_reason = StopReason::Aborted;
                break;
            }
        }

        stats.remaining_pairs = table.len();
        info!(
            "Finished training: {} merges learned ({:?})",
            merges.len(),
            stop_reason
        );

        TrainingOutput {
            merges,
            stop_reason,
            stats,
        }
    }
}

/// Learn up to `max_merges` merge rules from `corpus`.
///
/// Fails with [`TokenizerError::InvalidArgument`] when `max_merges` is
/// negative. An empty corpus yields an empty rule list.
pub fn learn(corpus: &str, max_merges: i64) -> Result<MergeRules> {
    let config = TrainingConfig::builder().max_merges(max_merges).build()?;
    let output = BpeTrainer::new(config)?.train(corpus)?;
    Ok(output.merges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmerge_core::SymbolPair;

    fn pairs(rules: &MergeRules) -> Vec<(String, String)> {
        rules
            .iter()
            .map(|r| (r.pair.first.to_string(), r.pair.second.to_string()))
            .collect()
    }

    #[test]
    fn test_hello_there_scenario() {
        let rules = learn("Hello There", 3).unwrap();
        assert!(rules.len() <= 3);
        assert_eq!(rules.len(), 3);

        let r0 = rules.get(0).unwrap();
        assert_eq!(r0.pair, SymbolPair::new("<", "H"));
        assert_eq!(r0.merged, "<H");

        let r1 = rules.get(1).unwrap();
        assert_eq!(r1.pair, SymbolPair::new("<", "T"));
        assert_eq!(r1.merged, "<T");

        let r2 = rules.get(2).unwrap();
        assert_eq!(r2.pair, SymbolPair::new("<H", "e"));
        assert_eq!(r2.merged, "<He");
    }

    #[test]
    fn test_zero_merges_returns_empty() {
        assert!(learn("Hello There", 0).unwrap().is_empty());
        assert!(learn("", 0).unwrap().is_empty());

        let output = BpeTrainer::with_max_merges(0).train("aaaa").unwrap();
        assert!(output.merges.is_empty());
        assert_eq!(output.stats, TrainingStats::default());
    }

    #[test]
    fn test_negative_merges_rejected() {
        let err = learn("Hello There", -1).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_corpus() {
        let output = BpeTrainer::with_max_merges(10).train("   \n ").unwrap();
        assert!(output.merges.is_empty());
        assert_eq!(output.stop_reason, StopReason::TableExhausted);
    }

    #[test]
    fn test_single_char_word_exhausts_table() {
        let output = BpeTrainer::with_max_merges(10).train("a").unwrap();
        assert_eq!(
            pairs(&output.merges),
            vec![("<".into(), "a".into()), ("<a".into(), ">".into())]
        );
        assert_eq!(output.stop_reason, StopReason::TableExhausted);
        assert_eq!(output.stats.remaining_pairs, 0);
    }

    #[test]
    fn test_rule_count_is_min_of_budget_and_iterations() {
        let text = "low lower lowest";
        let unbounded = BpeTrainer::with_max_merges(10_000).train(text).unwrap();
        assert_eq!(unbounded.stop_reason, StopReason::TableExhausted);
        let total = unbounded.merges.len();

        for budget in [1, 2, 5, total, total + 5] {
            let rules = learn(text, budget as i64).unwrap();
            assert_eq!(rules.len(), budget.min(total));
            // A shorter run is a prefix of a longer one
            assert_eq!(rules.as_slice(), &unbounded.merges.as_slice()[..rules.len()]);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "the cat sat on the mat with the hat";
        let a = learn(text, 15).unwrap();
        let b = learn(text, 15).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_frequency_drives_selection() {
        let rules = learn("ab ab ab cd", 1).unwrap();
        // (<,a), (a,b) and (b,>) all occur 3 times; "<" sorts first.
        assert_eq!(rules.get(0).unwrap().pair, SymbolPair::new("<", "a"));

        let rules = learn("xyz xyz qq qq qq qq", 1).unwrap();
        // Every pair of "qq" occurs 4 times; "<" sorts first.
        assert_eq!(rules.get(0).unwrap().pair, SymbolPair::new("<", "q"));
    }

    #[test]
    fn test_later_rules_build_on_earlier_ones() {
        let rules = learn("aaaa aaaa", 10).unwrap();
        assert!(rules
            .iter()
            .any(|r| r.pair.first.len() > 1 || r.pair.second.len() > 1));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = "she sells sea shells by the sea shore and the shells she sells are sea shells";
        let seq = BpeTrainer::new(TrainingConfig::builder().max_merges(40).build().unwrap())
            .unwrap()
            .train(text)
            .unwrap();
        let par = BpeTrainer::new(
            TrainingConfig::builder()
                .max_merges(40)
                .parallel(true)
                .build()
                .unwrap(),
        )
        .unwrap()
        .train(text)
        .unwrap();

        assert_eq!(seq.merges, par.merges);
        assert_eq!(seq.stats, par.stats);
    }

    #[test]
    fn test_min_frequency_stops_early() {
        let config = TrainingConfig::builder()
            .max_merges(100)
            .min_frequency(2)
            .build()
            .unwrap();
        let output = BpeTrainer::new(config).unwrap().train("ab ab cd").unwrap();

        assert_eq!(output.stop_reason, StopReason::BelowMinFrequency);
        assert!(!output.merges.is_empty());
        // "cd" only occurs once, so none of its pairs can be merged
        assert!(output.merges.iter().all(|r| !r.merged.contains('c')));
    }

    #[test]
    fn test_min_frequency_zero_rejected() {
        let err = TrainingConfig::builder().min_frequency(0).build().unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_split_pattern_rejected() {
        let err = TrainingConfig::builder()
            .split_pattern("[")
            .build()
            .unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_callback_can_abort() {
        let trainer = BpeTrainer::with_max_merges(50);
        let mut seen = Vec::new();
        let output = trainer
            .train_with("hello hello world", |rule, count| {
                seen.push((rule.rank, count));
                if rule.rank == 1 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(output.stop_reason, StopReason::Aborted);
        assert_eq!(output.merges.len(), 2);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, 2);

        let full = learn("hello hello world", 2).unwrap();
        assert_eq!(output.merges, full);
    }

    #[test]
    fn test_split_pattern_and_normalization() {
        let config = TrainingConfig::builder()
            .max_merges(1)
            .split_pattern(",")
            .normalization(NormalizationForm::NFC)
            .build()
            .unwrap();
        let output = BpeTrainer::new(config)
            .unwrap()
            .train("e\u{0301}e\u{0301},e\u{0301}")
            .unwrap();

        assert_eq!(output.stats.unique_words, 2);
        assert_eq!(
            output.merges.get(0).unwrap().pair,
            SymbolPair::new("<", "\u{00e9}")
        );
    }
}
