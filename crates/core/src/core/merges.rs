//! Merge rule management for BPE.
//!
//! This module provides the ordered list of learned merge rules. Rules are
//! kept in the order they were learned; that order is their rank and is the
//! order in which segmentation must apply them.

use super::symbol::{Symbol, SymbolPair};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A single learned merge: `pair` joins into `merged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    /// Order in which this rule was learned (0-based)
    pub rank: u32,
    /// The adjacent symbols to join
    pub pair: SymbolPair,
    /// The symbol the pair becomes
    pub merged: Symbol,
}

impl MergeRule {
    /// Create a rule whose merged symbol is the concatenation of `pair`.
    pub fn new(rank: u32, pair: SymbolPair) -> Self {
        let merged = pair.merged();
        Self { rank, pair, merged }
    }
}

/// Ordered collection of merge rules with pair lookup.
///
/// A pair can be learned again at a later rank when an intermediate merge
/// recreates it; the lookup index reports the earliest rank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<MergeRule>", into = "Vec<MergeRule>")]
pub struct MergeRules {
    /// Rules in rank order
    rules: Vec<MergeRule>,
    /// Pair -> earliest rank
    index: AHashMap<SymbolPair, u32>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Append a rule for `pair` at the next rank and return it.
    pub fn push(&mut self, pair: SymbolPair) -> &MergeRule {
        let rank = self.rules.len() as u32;
        self.index.entry(pair.clone()).or_insert(rank);
        self.rules.push(MergeRule::new(rank, pair));
        &self.rules[rank as usize]
    }

    /// Get the rule at `rank`.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeRule> {
        self.rules.get(rank as usize)
    }

    /// Earliest rank at which `pair` was learned.
    #[inline]
    pub fn rank_of(&self, pair: &SymbolPair) -> Option<u32> {
        self.index.get(pair).copied()
    }

    /// Iterate over rules in ascending rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// The rules as a slice, in rank order.
    pub fn as_slice(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Create merge rules from an ordered list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs(pairs: impl IntoIterator<Item = SymbolPair>) -> Self {
        let mut rules = Self::new();
        for pair in pairs {
            rules.push(pair);
        }
        rules
    }

    /// Check that ranks run 0..n in order and that every merged symbol is
    /// the concatenation of its pair.
    pub fn validate(&self) -> Result<()> {
        Self::validate_rules(&self.rules)
    }

    fn validate_rules(rules: &[MergeRule]) -> Result<()> {
        for (expected, rule) in rules.iter().enumerate() {
            if rule.rank as usize != expected {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule {} has rank {} (expected {})",
                    rule.pair, rule.rank, expected
                )));
            }
            if rule.pair.first.is_empty() || rule.pair.second.is_empty() {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule at rank {} has an empty symbol",
                    rule.rank
                )));
            }
            if rule.merged != rule.pair.merged() {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule at rank {} merges {} into {:?}",
                    rule.rank,
                    rule.pair,
                    rule.merged.as_str()
                )));
            }
        }
        Ok(())
    }
}

impl PartialEq for MergeRules {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for MergeRules {}

impl TryFrom<Vec<MergeRule>> for MergeRules {
    type Error = TokenizerError;

    fn try_from(rules: Vec<MergeRule>) -> Result<Self> {
        Self::validate_rules(&rules)?;

        let mut index = AHashMap::with_capacity(rules.len());
        for rule in &rules {
            index.entry(rule.pair.clone()).or_insert(rule.rank);
        }
        Ok(Self { rules, index })
    }
}

impl From<MergeRules> for Vec<MergeRule> {
    fn from(rules: MergeRules) -> Self {
        rules.rules
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Statistics about merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merge rules
    pub count: usize,
    /// Number of distinct pairs (a pair may be relearned)
    pub distinct_pairs: usize,
    /// Highest rank, 0 when empty
    pub max_rank: u32,
    /// Longest merged symbol, in characters
    pub longest_symbol: usize,
}

impl MergeRules {
    /// Get statistics about the merge rules.
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            count: self.len(),
            distinct_pairs: self.index.len(),
            max_rank: self.rules.last().map_or(0, |r| r.rank),
            longest_symbol: self
                .rules
                .iter()
                .map(|r| r.merged.chars().count())
                .max()
                .unwrap_or(0),
        }
    }
}
