//! Symbols and adjacent symbol pairs.
//!
//! A symbol is an immutable string token: a single character, a boundary
//! marker, or the concatenation of symbols joined by earlier merges.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An atomic token in a word's current segmentation.
///
/// `CompactString` keeps short symbols inline, which covers nearly every
/// symbol produced by a realistic number of merges.
pub type Symbol = CompactString;

/// Word-start boundary marker.
pub const WORD_START: &str = "<";

/// Word-end boundary marker.
pub const WORD_END: &str = ">";

/// An ordered pair of adjacent symbols.
///
/// Field order gives the derived `Ord` the tie-break used during training:
/// compare `first`, then `second`, with ordinary string ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolPair {
    pub first: Symbol,
    pub second: Symbol,
}

impl SymbolPair {
    /// Create a pair from anything string-like.
    pub fn new(first: impl Into<Symbol>, second: impl Into<Symbol>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// The symbol produced by merging this pair.
    pub fn merged(&self) -> Symbol {
        let mut merged = Symbol::with_capacity(self.first.len() + self.second.len());
        merged.push_str(&self.first);
        merged.push_str(&self.second);
        merged
    }

    /// Check whether `left` followed by `right` is this pair.
    #[inline]
    pub fn matches(&self, left: &str, right: &str) -> bool {
        self.first == left && self.second == right
    }
}

impl fmt::Display for SymbolPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.first.as_str(), self.second.as_str())
    }
}

impl<A: Into<Symbol>, B: Into<Symbol>> From<(A, B)> for SymbolPair {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_concatenates_in_order() {
        let pair = SymbolPair::new("<H", "e");
        assert_eq!(pair.merged(), "<He");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = SymbolPair::new("<", "T");
        let b = SymbolPair::new("<H", "e");
        let c = SymbolPair::new("<", "H");

        // "<" sorts before "<H" because it is a prefix
        assert!(a < b);
        assert!(c < a);

        let mut pairs = vec![b.clone(), a.clone(), c.clone()];
        pairs.sort();
        assert_eq!(pairs, vec![c, a, b]);
    }

    #[test]
    fn test_uppercase_before_lowercase() {
        assert!(SymbolPair::new("H", "e") < SymbolPair::new("e", "l"));
        assert!(SymbolPair::new("<", "x") < SymbolPair::new("H", "e"));
    }

    #[test]
    fn test_display() {
        assert_eq!(SymbolPair::new("l", "l").to_string(), r#"("l", "l")"#);
    }
}
