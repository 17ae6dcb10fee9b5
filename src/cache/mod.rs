//! Cache Module
//!
//! Read-through cache for the full product list with absolute and sliding expiry.

mod clock;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, ExpiryPolicy};
pub use stats::CacheStats;
pub use store::{Lookup, ProductListCache};
