//! Cache Module
//!
//! Request-deduplication cache for upstream weather payloads. Entries are keyed
//! by a normalized `endpoint?k=v&...` signature and expire after a fixed TTL.

mod clock;
mod entry;
mod key;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::cache_key;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{CacheStore, SharedCache};

// == Public Constants ==
/// Default entry TTL in seconds
pub const DEFAULT_TTL_SECS: u64 = 600;
