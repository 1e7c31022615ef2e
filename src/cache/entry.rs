//! Cache Entry Module
//!
//! A cached upstream payload together with its expiry.

use serde_json::Value;

// == Cache Entry ==
/// A single cached payload.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The upstream JSON document, stored as received
    pub value: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that lives for `ttl_seconds`.
    pub fn new(value: Value, now_ms: u64, ttl_seconds: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time reaches its expiration time, so
    /// a zero TTL produces an entry that is never visible.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds at `now_ms`, or 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"name": "London"}), 1_000, 600);

        assert_eq!(entry.value["name"], "London");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.expires_at, 601_000);
        assert!(!entry.is_expired_at(1_000));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!(1), 0, 1);

        assert!(!entry.is_expired_at(999));
        assert!(entry.is_expired_at(1_000));
        assert!(entry.is_expired_at(5_000));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new(json!(null), 42, 0);
        assert!(entry.is_expired_at(42));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(json!(1), 0, 10);

        assert_eq!(entry.ttl_remaining_ms(0), 10_000);
        assert_eq!(entry.ttl_remaining_ms(9_500), 500);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }
}
