//! Text splitting for pre-tokenization.
//!
//! Splits raw text into the words that training and segmentation operate on.
//! Empty pieces are always dropped.

use crate::error::{Result, TokenizerError};
use regex::Regex;

/// Splitting patterns.
#[derive(Debug, Clone, Default)]
pub enum SplitPattern {
    /// Split on Unicode whitespace
    #[default]
    Whitespace,
    /// Split on every match of a regex
    Pattern(Regex),
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    /// Pattern to split on
    pattern: SplitPattern,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new(pattern: SplitPattern) -> Self {
        Self { pattern }
    }

    /// Create a whitespace splitter.
    pub fn whitespace() -> Self {
        Self::new(SplitPattern::Whitespace)
    }

    /// Create a splitter that separates words on matches of `pattern`.
    pub fn regex(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| {
            TokenizerError::InvalidConfig(format!("invalid split pattern {pattern:?}: {e}"))
        })?;
        Ok(Self::new(SplitPattern::Pattern(re)))
    }

    /// Build from an optional pattern; `None` means whitespace.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(p) => Self::regex(p),
            None => Ok(Self::whitespace()),
        }
    }

    /// The regex source, if this is not the whitespace splitter.
    pub fn pattern_str(&self) -> Option<&str> {
        match &self.pattern {
            SplitPattern::Whitespace => None,
            SplitPattern::Pattern(re) => Some(re.as_str()),
        }
    }

    /// Split text into non-empty words.
    ///
    /// Pieces produced by a regex are trimmed; a piece that is empty after
    /// trimming is skipped.
    pub fn split<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match &self.pattern {
            SplitPattern::Whitespace => Box::new(text.split_whitespace()),
            SplitPattern::Pattern(re) => Box::new(
                re.split(text)
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(splitter: &Splitter, text: &str) -> Vec<String> {
        splitter.split(text).map(str::to_string).collect()
    }

    #[test]
    fn test_whitespace_split() {
        let splitter = Splitter::whitespace();
        assert_eq!(
            collect(&splitter, "hello world  test"),
            vec!["hello", "world", "test"]
        );
    }

    #[test]
    fn test_whitespace_split_tabs_and_newlines() {
        let splitter = Splitter::whitespace();
        assert_eq!(
            collect(&splitter, "  Hello\tThere\n\n"),
            vec!["Hello", "There"]
        );
    }

    #[test]
    fn test_regex_split() {
        let splitter = Splitter::regex(r"[,;]").unwrap();
        assert_eq!(
            collect(&splitter, "alpha, beta;;gamma"),
            vec!["alpha", "beta", "gamma"]
        );
        assert_eq!(splitter.pattern_str(), Some("[,;]"));
    }

    #[test]
    fn test_invalid_regex() {
        let err = Splitter::regex("(unclosed").unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_string() {
        let splitter = Splitter::whitespace();
        assert!(collect(&splitter, "").is_empty());
        assert!(collect(&splitter, "   \n ").is_empty());
    }
}
