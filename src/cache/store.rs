//! Product List Cache
//!
//! Single-key read-through cache holding the full product list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, ExpiryPolicy};
use crate::catalog::Product;

// == Lookup ==
/// Outcome of reading the cache.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// A live list; the whole list, never a partial one
    Hit(Arc<Vec<Product>>),
    /// Nothing live. Pass `generation` back to `populate` after loading.
    Miss { generation: u64 },
}

#[derive(Debug, Default)]
struct Slot {
    entry: Option<CacheEntry>,
    /// Bumped by every invalidation; fences off loads that started earlier
    generation: u64,
    stats: CacheStats,
}

// == Product List Cache ==
/// Holds at most one entry: the full product list.
///
/// Constructed once at startup and shared by every request. Mutations never
/// patch the list; they discard it through `invalidate`.
#[derive(Debug)]
pub struct ProductListCache {
    slot: RwLock<Slot>,
    /// Counted outside the slot so hits only need the read lock
    hits: AtomicU64,
    policy: ExpiryPolicy,
    clock: Arc<dyn Clock>,
}

impl ProductListCache {
    // == Constructor ==
    pub fn new(policy: ExpiryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(Slot::default()),
            hits: AtomicU64::new(0),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    // == Lookup ==
    /// Returns the cached list, or a miss carrying the current generation.
    ///
    /// Expired entries are dropped on the way and counted as misses. A hit
    /// pushes the sliding deadline out.
    pub async fn lookup(&self) -> Lookup {
        let now = self.clock.now_ms();

        // Hits share the read lock
        {
            let slot = self.slot.read().await;
            if let Some(products) = self.live_products(&slot, now) {
                return Lookup::Hit(products);
            }
        }

        let mut guard = self.slot.write().await;
        // Another reader may have populated or dropped the entry meanwhile
        if let Some(products) = self.live_products(&guard, now) {
            return Lookup::Hit(products);
        }

        let slot = &mut *guard;
        if slot.entry.take().is_some() {
            slot.stats.record_expiration();
            debug!("Product list cache entry expired");
        }

        slot.stats.record_miss();
        Lookup::Miss {
            generation: slot.generation,
        }
    }

    fn live_products(&self, slot: &Slot, now: u64) -> Option<Arc<Vec<Product>>> {
        let entry = slot.entry.as_ref().filter(|entry| !entry.is_expired(now))?;
        entry.touch(now);
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(entry.products.clone())
    }

    // == Populate ==
    /// Stores a freshly loaded list.
    ///
    /// Refused (returns false) when an invalidation happened after the matching
    /// `lookup`, since the list may predate the mutation that caused it.
    pub async fn populate(&self, generation: u64, products: Arc<Vec<Product>>) -> bool {
        let now = self.clock.now_ms();
        let mut slot = self.slot.write().await;

        if slot.generation != generation {
            debug!(
                loaded = generation,
                current = slot.generation,
                "Discarding product list loaded before an invalidation"
            );
            return false;
        }

        debug!(count = products.len(), "Product list cache populated");
        slot.entry = Some(CacheEntry::new(products, now, self.policy));
        true
    }

    // == Invalidate ==
    /// Evicts the entry. Idempotent; safe when nothing is cached.
    ///
    /// Returns true if an entry was present.
    pub async fn invalidate(&self) -> bool {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.stats.record_invalidation();

        let removed = slot.entry.take().is_some();
        debug!(removed, "Product list cache invalidated");
        removed
    }

    // == Purge Expired ==
    /// Drops the entry if a deadline has passed. Returns true if it did.
    pub async fn purge_expired(&self) -> bool {
        let now = self.clock.now_ms();
        let mut slot = self.slot.write().await;

        let expired = slot
            .entry
            .as_ref()
            .is_some_and(|entry| entry.is_expired(now));
        if expired {
            slot.entry = None;
            slot.stats.record_expiration();
        }
        expired
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let slot = self.slot.read().await;
        let mut stats = slot.stats.clone();
        stats.hits = self.hits.load(Ordering::Relaxed);
        stats.populated = slot.entry.is_some();
        stats
    }

    /// Whether a list is currently held, expired or not.
    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.entry.is_some()
    }
}
