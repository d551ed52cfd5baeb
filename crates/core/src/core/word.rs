//! Word representations.
//!
//! A word is stored as the ordered sequence of its current symbols, always
//! starting with [`WORD_START`] and ending with [`WORD_END`] until those
//! markers are themselves merged into neighbouring symbols.

use super::merges::MergeRules;
use super::symbol::{Symbol, SymbolPair, WORD_END, WORD_START};
use std::fmt;

/// The current segmentation of one word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    /// Build the initial representation `[<] + chars + [>]`.
    ///
    /// Characters are Unicode scalar values, so multi-byte characters are
    /// never split.
    pub fn from_text(text: &str) -> Self {
        let mut symbols = Vec::with_capacity(text.chars().count() + 2);
        symbols.push(Symbol::new(WORD_START));
        symbols.extend(text.chars().map(|c| {
            let mut buf = [0u8; 4];
            Symbol::new(c.encode_utf8(&mut buf))
        }));
        symbols.push(Symbol::new(WORD_END));
        Self { symbols }
    }

    /// Wrap an existing symbol sequence without adding markers.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    /// Symbols as owned strings, mostly for assertions and display.
    pub fn to_strings(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.to_string()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over adjacent symbol pairs, left to right.
    pub fn pairs(&self) -> impl Iterator<Item = (&Symbol, &Symbol)> + '_ {
        self.symbols.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Check whether `pair` occurs at any adjacent position.
    pub fn contains_pair(&self, pair: &SymbolPair) -> bool {
        self.pairs().any(|(a, b)| pair.matches(a, b))
    }

    /// Merge every non-overlapping occurrence of `pair` into `merged`,
    /// scanning left to right.
    ///
    /// For each occurrence `on_change` is told which adjacent pairs were
    /// destroyed (`-1`) and created (`+1`): the left and right neighbour
    /// pairs and the occurrence itself. Neighbours are read from the live
    /// sequence, so a neighbour produced by an earlier occurrence in the same
    /// pass is reported as the merged symbol.
    ///
    /// Returns the number of occurrences merged.
    pub fn merge_pair<F>(&mut self, pair: &SymbolPair, merged: &Symbol, mut on_change: F) -> usize
    where
        F: FnMut(SymbolPair, i64),
    {
        if self.symbols.len() < 2 {
            return 0;
        }

        let old = std::mem::take(&mut self.symbols);
        let mut out: Vec<Symbol> = Vec::with_capacity(old.len());
        let mut merges = 0;
        let mut i = 0;

        while i < old.len() {
            if i + 1 < old.len() && pair.matches(&old[i], &old[i + 1]) {
                if let Some(prev) = out.last() {
                    on_change(SymbolPair::new(prev.clone(), pair.first.clone()), -1);
                    on_change(SymbolPair::new(prev.clone(), merged.clone()), 1);
                }
                if let Some(next) = old.get(i + 2) {
                    on_change(SymbolPair::new(pair.second.clone(), next.clone()), -1);
                    on_change(SymbolPair::new(merged.clone(), next.clone()), 1);
                }
                on_change(pair.clone(), -1);

                out.push(merged.clone());
                merges += 1;
                // The right symbol is consumed; scanning resumes after it.
                i += 2;
            } else {
                out.push(old[i].clone());
                i += 1;
            }
        }

        self.symbols = out;
        merges
    }

    /// Merge every occurrence of `pair` without reporting pair changes.
    pub fn merge(&mut self, pair: &SymbolPair, merged: &Symbol) -> usize {
        self.merge_pair(pair, merged, |_, _| {})
    }

    /// Apply every rule in ascending rank order.
    ///
    /// Returns the total number of merges performed.
    pub fn apply_rules(&mut self, rules: &MergeRules) -> usize {
        let mut total = 0;
        for rule in rules.iter() {
            if self.symbols.len() < 2 {
                break;
            }
            total += self.merge(&rule.pair, &rule.merged);
        }
        total
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(symbol)?;
        }
        Ok(())
    }
}
