//! Cache Statistics Module
//!
//! Tracks hits, misses, invalidations and expirations of the product list cache.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from the cached list
    pub hits: u64,
    /// Reads that had to go to the repository
    pub misses: u64,
    /// Entries discarded because of a mutation or explicit invalidation
    pub invalidations: u64,
    /// Entries discarded because a deadline passed
    pub expirations: u64,
    /// Whether a list is currently cached
    pub populated: bool,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}
