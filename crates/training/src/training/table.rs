//! Pair-frequency table for BPE training.
//!
//! Counts every adjacent symbol pair across the corpus, weighted by word
//! occurrence. After the initial count the table is only ever updated
//! incrementally from the changes reported while merging live words. A pair
//! whose count reaches zero is removed, so an empty table means there is
//! nothing left to merge.

use super::corpus::Corpus;
use ahash::{AHashMap, AHashSet};
use pairmerge_core::{MergeCandidate, PairPriorityQueue, Symbol, SymbolPair};
use rayon::prelude::*;

type PairCounts = AHashMap<SymbolPair, u64>;
type PairLocations = AHashMap<SymbolPair, AHashSet<usize>>;

/// Result of applying one merge to the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeEffect {
    /// Unique words that contained the pair
    pub words_touched: usize,
    /// Occurrences merged, weighted by word count
    pub occurrences: u64,
}

/// Live pair counts plus the index used to select and apply merges.
#[derive(Debug, Default)]
pub struct PairTable {
    /// Pair -> frequency count
    counts: PairCounts,
    /// Pair -> indices of words that may contain it (may be stale)
    locations: PairLocations,
    /// Best-pair selection
    queue: PairPriorityQueue,
}

impl PairTable {
    /// Count all pairs sequentially.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut counts = PairCounts::new();
        let mut locations = PairLocations::new();

        for (idx, (word, &count)) in corpus
            .words()
            .iter()
            .zip(corpus.word_counts())
            .enumerate()
        {
            for (a, b) in word.pairs() {
                let pair = SymbolPair::new(a.clone(), b.clone());
                *counts.entry(pair.clone()).or_insert(0) += count;
                locations.entry(pair).or_default().insert(idx);
            }
        }

        Self::from_parts(counts, locations)
    }

    /// Count all pairs in parallel.
    ///
    /// Each word is counted independently and the partial tables are reduced
    /// into one; the result is identical to [`PairTable::from_corpus`].
    pub fn from_corpus_parallel(corpus: &Corpus) -> Self {
        let (counts, locations) = corpus
            .words()
            .par_iter()
            .zip(corpus.word_counts().par_iter())
            .enumerate()
            .map(|(idx, (word, &count))| {
                let mut counts = PairCounts::new();
                let mut locations = PairLocations::new();
                for (a, b) in word.pairs() {
                    let pair = SymbolPair::new(a.clone(), b.clone());
                    *counts.entry(pair.clone()).or_insert(0) += count;
                    locations.entry(pair).or_default().insert(idx);
                }
                (counts, locations)
            })
            .reduce(
                || (PairCounts::new(), PairLocations::new()),
                |(mut acc_counts, mut acc_locations), (counts, locations)| {
                    for (pair, count) in counts {
                        *acc_counts.entry(pair).or_insert(0) += count;
                    }
                    for (pair, words) in locations {
                        acc_locations.entry(pair).or_default().extend(words);
                    }
                    (acc_counts, acc_locations)
                },
            );

        Self::from_parts(counts, locations)
    }

    fn from_parts(counts: PairCounts, locations: PairLocations) -> Self {
        let mut queue = PairPriorityQueue::with_capacity(counts.len());
        for (pair, &count) in &counts {
            queue.push(MergeCandidate::new(pair.clone(), count));
        }

        Self {
            counts,
            locations,
            queue,
        }
    }

    /// Current count for `pair`, zero when absent.
    #[inline]
    pub fn get(&self, pair: &SymbolPair) -> u64 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Number of distinct pairs with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The live counts.
    pub fn counts(&self) -> &AHashMap<SymbolPair, u64> {
        &self.counts
    }

    /// Remove and return the best pair: highest count, then smallest pair.
    pub fn pop_best(&mut self) -> Option<MergeCandidate> {
        self.queue.pop()
    }

    /// Best pair found by scanning every count.
    ///
    /// Same ordering as [`PairTable::pop_best`] but leaves the table untouched.
    pub fn best_by_scan(&self) -> Option<MergeCandidate> {
        self.counts
            .iter()
            .map(|(pair, &count)| MergeCandidate::new(pair.clone(), count))
            .max()
    }

    /// Merge `pair` into `merged` in every word that contains it and bring
    /// the counts up to date.
    pub fn apply_merge(
        &mut self,
        corpus: &mut Corpus,
        pair: &SymbolPair,
        merged: &Symbol,
    ) -> MergeEffect {
        let mut candidates: Vec<usize> = self
            .locations
            .remove(pair)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        candidates.sort_unstable();

        let mut deltas: AHashMap<SymbolPair, i64> = AHashMap::new();
        let mut new_locations: PairLocations = AHashMap::new();
        let mut effect = MergeEffect::default();

        for idx in candidates {
            let merged_here = corpus.merge_word(idx, pair, merged, |changed, delta, count| {
                if delta > 0 {
                    new_locations
                        .entry(changed.clone())
                        .or_default()
                        .insert(idx);
                }
                *deltas.entry(changed).or_insert(0) += delta * count as i64;
            });
            if merged_here > 0 {
                effect.words_touched += 1;
                effect.occurrences += merged_here as u64 * corpus.word_counts()[idx];
            }
        }

        for (changed, delta) in deltas {
            if delta == 0 {
                continue;
            }
            let current = self.get(&changed) as i64;
            let updated = current + delta;
            debug_assert!(updated >= 0, "pair {changed} count went negative");

            if updated > 0 {
                self.counts.insert(changed.clone(), updated as u64);
                self.queue.update(changed, updated as u64);
            } else {
                self.counts.remove(&changed);
                self.locations.remove(&changed);
                self.queue.update(changed, 0);
            }
        }

        for (changed, words) in new_locations {
            if self.counts.contains_key(&changed) {
                self.locations.entry(changed).or_default().extend(words);
            }
        }

        debug_assert_eq!(self.get(pair), 0, "merged pair {pair} still counted");
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> SymbolPair {
        SymbolPair::new(a, b)
    }

    fn recount(corpus: &Corpus) -> AHashMap<SymbolPair, u64> {
        PairTable::from_corpus(corpus).counts().clone()
    }

    #[test]
    fn test_construction_counts_adjacent_pairs() {
        let corpus = Corpus::from_text("Hello There");
        let table = PairTable::from_corpus(&corpus);

        assert_eq!(table.len(), 12);
        assert_eq!(table.get(&pair("l", "l")), 1);
        assert_eq!(table.get(&pair("<", "H")), 1);
        assert_eq!(table.get(&pair("e", ">")), 1);
        assert_eq!(table.get(&pair("x", "y")), 0);
        assert!(!table.counts().contains_key(&pair("x", "y")));
    }

    #[test]
    fn test_counts_weighted_by_occurrence() {
        let corpus = Corpus::from_text("ab ab ab bc");
        let table = PairTable::from_corpus(&corpus);
        assert_eq!(table.get(&pair("a", "b")), 3);
        assert_eq!(table.get(&pair("<", "a")), 3);
        assert_eq!(table.get(&pair("b", "c")), 1);
        assert_eq!(table.get(&pair("b", ">")), 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = "the quick brown fox jumps over the lazy dog the end \
                    bananas and bandanas in a cabana";
        let corpus = Corpus::from_text(text);

        let seq = PairTable::from_corpus(&corpus);
        let par = PairTable::from_corpus_parallel(&corpus);
        assert_eq!(seq.counts(), par.counts());
        assert_eq!(seq.best_by_scan(), par.best_by_scan());
    }

    #[test]
    fn test_incremental_matches_recount_after_each_merge() {
        let mut corpus = Corpus::from_text("banana bandana aaaa abab cabana banana");
        let mut table = PairTable::from_corpus(&corpus);

        for _ in 0..12 {
            let Some(best) = table.pop_best() else { break };
            let merged = best.pair.merged();
            table.apply_merge(&mut corpus, &best.pair, &merged);

            assert_eq!(table.get(&best.pair), 0);
            assert_eq!(table.counts(), &recount(&corpus));
        }
    }

    #[test]
    fn test_overlapping_occurrences() {
        let mut corpus = Corpus::from_text("aaaa");
        let mut table = PairTable::from_corpus(&corpus);
        assert_eq!(table.get(&pair("a", "a")), 3);

        let effect = table.apply_merge(&mut corpus, &pair("a", "a"), &Symbol::new("aa"));

        assert_eq!(effect.occurrences, 2);
        assert_eq!(effect.words_touched, 1);
        assert_eq!(corpus.words()[0].to_string(), "< aa aa >");
        assert_eq!(table.get(&pair("a", "a")), 0);
        assert_eq!(table.get(&pair("aa", "aa")), 1);
        assert_eq!(table.get(&pair("<", "aa")), 1);
        assert_eq!(table.get(&pair("aa", ">")), 1);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_untouched_words_keep_their_pairs() {
        let mut corpus = Corpus::from_text("ll xy");
        let mut table = PairTable::from_corpus(&corpus);

        table.apply_merge(&mut corpus, &pair("l", "l"), &Symbol::new("ll"));

        assert_eq!(corpus.words()[1].to_string(), "< x y >");
        assert_eq!(table.get(&pair("x", "y")), 1);
        assert_eq!(table.get(&pair("<", "ll")), 1);
        assert_eq!(table.get(&pair("<", "l")), 0);
    }

    #[test]
    fn test_heap_selection_matches_scan() {
        let mut corpus = Corpus::from_text("low lower lowest newer wider new news");
        let mut table = PairTable::from_corpus(&corpus);

        while !table.is_empty() {
            let expected = table.best_by_scan();
            let best = table.pop_best();
            assert_eq!(best, expected);

            let Some(best) = best else { break };
            let merged = best.pair.merged();
            table.apply_merge(&mut corpus, &best.pair, &merged);
        }
        assert!(table.pop_best().is_none());
    }

    #[test]
    fn test_table_drains_to_empty() {
        let mut corpus = Corpus::from_text("a");
        let mut table = PairTable::from_corpus(&corpus);
        assert_eq!(table.len(), 2);

        let mut merges = 0;
        while let Some(best) = table.pop_best() {
            let merged = best.pair.merged();
            table.apply_merge(&mut corpus, &best.pair, &merged);
            merges += 1;
        }

        assert_eq!(merges, 2);
        assert!(table.is_empty());
        assert_eq!(corpus.words()[0].to_strings(), vec!["<a>"]);
    }
}
