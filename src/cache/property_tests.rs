//! Property-Based Tests for Cache Module
//!
//! Drives the product list cache with random operation sequences and checks it
//! against a simple model of the expiry and invalidation rules.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, ExpiryPolicy, Lookup, ManualClock, ProductListCache};
use crate::catalog::{Product, ProductInput};
use rust_decimal::Decimal;

// == Test Configuration ==
const ABSOLUTE_MS: u64 = 300_000;
const SLIDING_MS: u64 = 120_000;

#[derive(Debug, Clone)]
enum CacheOp {
    /// Read through: on a miss, load version `n` and populate
    Read,
    Invalidate,
    Advance(u64),
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => Just(CacheOp::Read),
        1 => Just(CacheOp::Invalidate),
        2 => (0u64..200_000).prop_map(CacheOp::Advance),
    ]
}

/// A one-product list whose id encodes the load that produced it.
fn version_list(version: i32) -> Arc<Vec<Product>> {
    Arc::new(vec![ProductInput {
        name: format!("v{version}"),
        description: None,
        base_price: Decimal::ONE,
        markup_percentage: 0,
        category_id: 1,
    }
    .with_id(version)])
}

/// Reference model: (version, populated_at, last_read)
#[derive(Debug, Default)]
struct Model {
    cached: Option<(i32, u64, u64)>,
}

impl Model {
    fn live(&self, now: u64) -> Option<i32> {
        self.cached.and_then(|(version, created, last)| {
            let expired = now >= created + ABSOLUTE_MS || now >= last + SLIDING_MS;
            (!expired).then_some(version)
        })
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A hit always serves the most recent load since the last invalidation,
    // and only while neither deadline has passed.
    #[test]
    fn prop_cache_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        tokio_test::block_on(async {
            let clock = Arc::new(ManualClock::new(0));
            let policy = ExpiryPolicy::new(
                Duration::from_millis(ABSOLUTE_MS),
                Duration::from_millis(SLIDING_MS),
            );
            let cache = ProductListCache::new(policy, clock.clone());
            let mut model = Model::default();
            let mut now = 0u64;
            let mut next_version = 1;

            for op in ops {
                match op {
                    CacheOp::Read => match cache.lookup().await {
                        Lookup::Hit(products) => {
                            let expected = model.live(now);
                            prop_assert_eq!(Some(products[0].id), expected);
                            if let Some((_, _, last)) = model.cached.as_mut() {
                                *last = now;
                            }
                        }
                        Lookup::Miss { generation } => {
                            prop_assert_eq!(model.live(now), None);
                            prop_assert!(cache.populate(generation, version_list(next_version)).await);
                            model.cached = Some((next_version, now, now));
                            next_version += 1;
                        }
                    },
                    CacheOp::Invalidate => {
                        cache.invalidate().await;
                        model.cached = None;
                    }
                    CacheOp::Advance(ms) => {
                        clock.advance(Duration::from_millis(ms));
                        now += ms;
                    }
                }
            }
            Ok(())
        })?;
    }

    // Two reads with no time passing and no mutation in between hit the
    // loader at most once.
    #[test]
    fn prop_back_to_back_reads_load_once(start in 0u64..1_000_000) {
        tokio_test::block_on(async {
            let clock = Arc::new(ManualClock::new(start));
            let cache = ProductListCache::new(ExpiryPolicy::default(), clock);
            let mut loads = 0;

            for _ in 0..2 {
                if let Lookup::Miss { generation } = cache.lookup().await {
                    loads += 1;
                    cache.populate(generation, version_list(loads)).await;
                }
            }
            prop_assert_eq!(loads, 1);
            Ok(())
        })?;
    }

    // The remaining lifetime never exceeds either window.
    #[test]
    fn prop_ttl_remaining_bounded(created in 0u64..1_000_000, read_after in 0u64..400_000) {
        let policy = ExpiryPolicy::new(
            Duration::from_millis(ABSOLUTE_MS),
            Duration::from_millis(SLIDING_MS),
        );
        let entry = CacheEntry::new(version_list(1), created, policy);
        let now = created + read_after;
        if !entry.is_expired(now) {
            entry.touch(now);
            let remaining = entry.ttl_remaining_ms(now);
            prop_assert!(remaining <= SLIDING_MS);
            prop_assert!(now + remaining <= created + ABSOLUTE_MS);
        } else {
            prop_assert_eq!(entry.ttl_remaining_ms(now), 0);
        }
    }
}
