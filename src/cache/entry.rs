//! Cache Entry Module
//!
//! The cached product list together with its absolute and sliding deadlines.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Product;

// == Expiry Policy ==
/// When a populated entry stops being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Lifetime measured from population
    pub absolute: Duration,
    /// Allowed idle time between reads
    pub sliding: Duration,
}

impl ExpiryPolicy {
    pub fn new(absolute: Duration, sliding: Duration) -> Self {
        Self { absolute, sliding }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            absolute: Duration::from_secs(5 * 60),
            sliding: Duration::from_secs(2 * 60),
        }
    }
}

// == Cache Entry ==
/// One populated product list. The list is shared, never mutated in place.
///
/// Reads only need `&self`: the last-read time is atomic so concurrent hits
/// can share a read lock.
#[derive(Debug)]
pub struct CacheEntry {
    /// The cached list, ordered by id
    pub products: Arc<Vec<Product>>,
    /// Population timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Last read timestamp (Unix milliseconds)
    last_accessed: AtomicU64,
    /// Hard deadline (Unix milliseconds)
    pub expires_at: u64,
    sliding_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(products: Arc<Vec<Product>>, now: u64, policy: ExpiryPolicy) -> Self {
        Self {
            products,
            created_at: now,
            last_accessed: AtomicU64::new(now),
            expires_at: now.saturating_add(millis(policy.absolute)),
            sliding_ms: millis(policy.sliding),
        }
    }

    pub fn last_accessed(&self) -> u64 {
        self.last_accessed.load(Ordering::Relaxed)
    }

    fn sliding_deadline(&self) -> u64 {
        self.last_accessed().saturating_add(self.sliding_ms)
    }

    // == Is Expired ==
    /// Checks both deadlines.
    ///
    /// An entry is expired once `now` reaches the absolute deadline, or once it
    /// has gone unread for the whole sliding window, whichever comes first.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at || now >= self.sliding_deadline()
    }

    /// Records a read, pushing the sliding deadline out. Never moves it back.
    pub fn touch(&self, now: u64) {
        self.last_accessed.fetch_max(now, Ordering::Relaxed);
    }

    /// Milliseconds until the entry expires, 0 once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        let deadline = self.expires_at.min(self.sliding_deadline());
        deadline.saturating_sub(now)
    }
}

/// Whole milliseconds, saturating for durations past `u64::MAX` ms.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
