//! Pre-tokenization pipeline.
//!
//! Turns raw text into words: optional Unicode normalization followed by
//! splitting. Each word then becomes a [`Word`](crate::Word) via
//! [`Word::from_text`](crate::Word::from_text).

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{SplitPattern, Splitter};

use crate::core::Word;
use crate::error::Result;

/// Normalizer and splitter applied together.
#[derive(Debug, Clone, Default)]
pub struct PreTokenizer {
    normalizer: Normalizer,
    splitter: Splitter,
}

impl PreTokenizer {
    pub fn new(normalizer: Normalizer, splitter: Splitter) -> Self {
        Self {
            normalizer,
            splitter,
        }
    }

    /// Build from a normalization form and optional split regex.
    pub fn from_config(form: NormalizationForm, split_pattern: Option<&str>) -> Result<Self> {
        Ok(Self::new(
            Normalizer::new(form),
            Splitter::from_pattern(split_pattern)?,
        ))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    /// Call `f` with every non-empty word of `text`, in order.
    pub fn for_each_word<F: FnMut(&str)>(&self, text: &str, mut f: F) {
        let normalized = self.normalizer.normalize(text);
        for word in self.splitter.split(&normalized) {
            f(word);
        }
    }

    /// Collect the words of `text` as owned strings.
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.for_each_word(text, |w| out.push(w.to_string()));
        out
    }

    /// Tokenize `text` into initial word representations.
    pub fn tokenize(&self, text: &str) -> Vec<Word> {
        let mut out = Vec::new();
        self.for_each_word(text, |w| out.push(Word::from_text(w)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_hello_there() {
        let words = PreTokenizer::default().tokenize("Hello There");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].to_string(), "< H e l l o >");
        assert_eq!(words[1].to_string(), "< T h e r e >");
    }

    #[test]
    fn test_tokenize_skips_empty_tokens() {
        let words = PreTokenizer::default().tokenize("  a \n\n b  ");
        assert_eq!(words.len(), 2);
        assert!(PreTokenizer::default().tokenize(" \t ").is_empty());
    }

    #[test]
    fn test_normalization_before_split() {
        let pre = PreTokenizer::from_config(NormalizationForm::NFC, None).unwrap();
        let words = pre.words("cafe\u{0301} bar");
        assert_eq!(words, vec!["caf\u{00e9}", "bar"]);
        assert_eq!(pre.tokenize("cafe\u{0301}")[0].len(), 6);
    }

    #[test]
    fn test_codepoints_not_bytes() {
        let words = PreTokenizer::default().tokenize("naïve");
        assert_eq!(words[0].to_strings(), vec!["<", "n", "a", "ï", "v", "e", ">"]);
    }
}
