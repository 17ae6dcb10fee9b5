//! Cache Sweep Task
//!
//! Background task that evicts the product list once a deadline has passed,
//! so an idle server does not hold on to it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ProductListCache;

/// Spawns a background task that periodically purges an expired product list.
///
/// # Arguments
/// * `cache` - Shared product list cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<ProductListCache>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if cache.purge_expired().await {
                info!("Cache sweep: evicted expired product list");
            } else {
                debug!("Cache sweep: nothing to evict");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ExpiryPolicy, Lookup, ManualClock};

    fn cache_with_clock() -> (Arc<ProductListCache>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let cache = Arc::new(ProductListCache::new(
            ExpiryPolicy::default(),
            clock.clone(),
        ));
        (cache, clock)
    }

    async fn populate(cache: &ProductListCache) {
        if let Lookup::Miss { generation } = cache.lookup().await {
            cache.populate(generation, Arc::new(Vec::new())).await;
        }
    }

    #[tokio::test]
    async fn test_sweep_evicts_expired_list() {
        let (cache, clock) = cache_with_clock();
        populate(&cache).await;
        clock.advance(Duration::from_secs(600));

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(!cache.is_populated().await, "Expired list should have been swept");
        assert_eq!(cache.stats().await.expirations, 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_list() {
        let (cache, _clock) = cache_with_clock();
        populate(&cache).await;

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.is_populated().await, "Live list should not be swept");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let (cache, _clock) = cache_with_clock();
        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
