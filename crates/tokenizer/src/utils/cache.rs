//! Segmentation cache for repeated words.
//!
//! Natural text repeats a small set of words very often, so segmenting each
//! distinct word once and reusing the result saves most of the work.

use ahash::AHashMap;
use compact_str::CompactString;
use pairmerge_core::Symbol;
use std::collections::VecDeque;

/// LRU cache from word to its segmentation.
///
/// A capacity of zero disables caching.
#[derive(Debug)]
pub struct SegmentationCache {
    /// word -> segmented symbols
    cache: AHashMap<CompactString, Vec<Symbol>>,
    /// Maximum number of entries in the cache
    capacity: usize,
    /// Least recently used at the front
    order: VecDeque<CompactString>,
    hits: u64,
    misses: u64,
}

impl SegmentationCache {
    /// Create a new cache with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: AHashMap::with_capacity(capacity),
            capacity,
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a new cache with default capacity (1000).
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Get the cached segmentation or compute it with `segment`.
    pub fn get_or_segment<F>(&mut self, word: &str, segment: F) -> Vec<Symbol>
    where
        F: FnOnce(&str) -> Vec<Symbol>,
    {
        if let Some(cached) = self.cache.get(word).cloned() {
            self.hits += 1;
            self.touch(word);
            return cached;
        }

        self.misses += 1;
        let symbols = segment(word);
        self.insert(CompactString::new(word), symbols.clone());
        symbols
    }

    /// Move `word` to the most recently used end.
    fn touch(&mut self, word: &str) {
        if let Some(pos) = self.order.iter().position(|w| w == word) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn insert(&mut self, key: CompactString, value: Vec<Symbol>) {
        if self.capacity == 0 {
            return;
        }

        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.cache.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(key.clone());
        self.cache.insert(key, value);
    }

    /// Clear all entries and counters.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get the cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check whether `word` is currently cached.
    pub fn contains(&self, word: &str) -> bool {
        self.cache.contains_key(word)
    }

    /// Resize the cache, evicting the least recently used entries first.
    pub fn resize(&mut self, new_capacity: usize) {
        self.capacity = new_capacity;

        while self.order.len() > new_capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.cache.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate: (lookups > 0).then(|| self.hits as f64 / lookups as f64),
        }
    }
}

impl Default for SegmentationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate, `None` before the first lookup
    pub hit_rate: Option<f64>,
}
