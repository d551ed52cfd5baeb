//! Training corpus.
//!
//! The corpus owns every word representation for the duration of training.
//! Identical words are stored once with an occurrence count, in order of
//! first appearance; pair counts are weighted by that count.

use ahash::AHashMap;
use compact_str::CompactString;
use pairmerge_core::{PreTokenizer, Symbol, SymbolPair, Word};

/// Unique words of a training text with their occurrence counts.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Word representations, mutated in place as merges are applied
    words: Vec<Word>,
    /// Occurrences of each word in the source text
    word_counts: Vec<u64>,
    /// Source text -> position in `words`
    index: AHashMap<CompactString, usize>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from raw text with the default whitespace splitting.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, &PreTokenizer::default())
    }

    /// Build a corpus from raw text using `pre_tokenizer`.
    pub fn from_text_with(text: &str, pre_tokenizer: &PreTokenizer) -> Self {
        let mut corpus = Self::new();
        pre_tokenizer.for_each_word(text, |word| corpus.add_word(word));
        corpus
    }

    /// Add one occurrence of `word`.
    ///
    /// Empty words are ignored.
    pub fn add_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        if let Some(&pos) = self.index.get(word) {
            self.word_counts[pos] += 1;
        } else {
            self.index.insert(CompactString::new(word), self.words.len());
            self.words.push(Word::from_text(word));
            self.word_counts.push(1);
        }
    }

    /// Get the number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total count of all word occurrences.
    pub fn total_word_occurrences(&self) -> u64 {
        self.word_counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get a reference to the words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Get a reference to the word counts.
    pub fn word_counts(&self) -> &[u64] {
        &self.word_counts
    }

    /// Merge `pair` inside the word at `idx`, forwarding pair changes
    /// together with that word's occurrence count.
    pub(crate) fn merge_word<F>(
        &mut self,
        idx: usize,
        pair: &SymbolPair,
        merged: &Symbol,
        mut on_change: F,
    ) -> usize
    where
        F: FnMut(SymbolPair, i64, u64),
    {
        let count = self.word_counts[idx];
        self.words[idx].merge_pair(pair, merged, |p, delta| on_change(p, delta, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let corpus = Corpus::from_text("Hello There");
        assert_eq!(corpus.word_count(), 2);
        assert_eq!(corpus.words()[0].to_string(), "< H e l l o >");
        assert_eq!(corpus.words()[1].to_string(), "< T h e r e >");
    }

    #[test]
    fn test_duplicate_words_are_counted() {
        let corpus = Corpus::from_text("low low lower low");
        assert_eq!(corpus.word_count(), 2);
        assert_eq!(corpus.word_counts(), &[3, 1]);
        assert_eq!(corpus.total_word_occurrences(), 4);
    }

    #[test]
    fn test_empty_text() {
        assert!(Corpus::from_text("").is_empty());
        assert!(Corpus::from_text(" \n\t ").is_empty());
    }

    #[test]
    fn test_add_word_ignores_empty() {
        let mut corpus = Corpus::new();
        corpus.add_word("");
        corpus.add_word("a");
        assert_eq!(corpus.word_count(), 1);
        assert_eq!(corpus.words()[0].to_string(), "< a >");
    }

    #[test]
    fn test_merge_word_forwards_count() {
        let mut corpus = Corpus::from_text("aa aa");
        let pair = SymbolPair::new("a", "a");
        let mut seen = Vec::new();
        let n = corpus.merge_word(0, &pair, &pair.merged(), |_, _, count| seen.push(count));
        assert_eq!(n, 1);
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|&c| c == 2));
    }
}
