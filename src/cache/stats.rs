//! Cache Statistics Module
//!
//! Tracks hits, misses and evictions, and builds the stats snapshot.

use serde::Serialize;

// == Cache Counters ==
/// Monotonic counters kept by the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheCounters {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (absent or expired)
    pub misses: u64,
    /// Number of entries removed to make room
    pub evictions: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Hit Ratio ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored
    pub item_count: usize,
    /// Bytes currently charged against capacity
    pub current_size: u64,
    /// Configured capacity in bytes
    pub max_size: u64,
    /// current_size / max_size as a percentage
    pub usage_percentage: f64,
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
    pub evictions: u64,
}

impl CacheStats {
    /// Builds a snapshot from the store's totals and counters.
    pub fn new(item_count: usize, current_size: u64, max_size: u64, counters: &CacheCounters) -> Self {
        let usage_percentage = if max_size == 0 {
            0.0
        } else {
            current_size as f64 / max_size as f64 * 100.0
        };

        Self {
            item_count,
            current_size,
            max_size,
            usage_percentage,
            hits: counters.hits,
            misses: counters.misses,
            hit_ratio: counters.hit_ratio(),
            evictions: counters.evictions,
        }
    }
}
