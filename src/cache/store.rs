//! Cache Store Module
//!
//! Main cache engine: a HashMap of payloads keyed by normalized request
//! signature, with TTL expiry and an optional LRU capacity bound.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{cache_key, CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

/// The process-wide cache handle shared by request handlers and the sweep task.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    /// Payloads by cache key
    entries: HashMap<String, CacheEntry>,
    /// Usage order, only consulted when a capacity bound is set
    lru: LruTracker,
    stats: CacheStats,
    /// TTL in seconds applied to every insertion
    ttl: u64,
    /// Optional capacity bound; `None` leaves growth unbounded
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an unbounded store whose entries live for `ttl` seconds.
    pub fn new(ttl: u64) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a store that reads time from `clock`.
    pub fn with_clock(ttl: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            ttl,
            max_entries: None,
            clock,
        }
    }

    /// Bounds the store to `max_entries`, evicting the least recently used entry
    /// when a new key arrives at capacity. A bound of zero is ignored.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|max| *max > 0);
        self
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Looks up the payload cached for `endpoint` with `params`.
    ///
    /// Returns `None` when nothing was stored or the entry has expired.
    pub fn get<K, V>(&mut self, endpoint: &str, params: &[(K, V)]) -> Option<Value>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = cache_key(endpoint, params);
        self.get_by_key(&key)
    }

    /// Looks up a payload by an already derived cache key.
    pub fn get_by_key(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                if self.max_entries.is_some() {
                    self.lru.touch(key);
                }
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores `payload` for `endpoint` with `params`, replacing any previous entry
    /// and restarting its TTL.
    pub fn set<K, V>(&mut self, endpoint: &str, params: &[(K, V)], payload: Value)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = cache_key(endpoint, params);
        self.set_by_key(key, payload);
    }

    /// Stores a payload under an already derived cache key.
    pub fn set_by_key(&mut self, key: String, payload: Value) {
        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max {
                if let Some(evicted) = self.lru.evict_oldest() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
            }
            self.lru.touch(&key);
        }

        let entry = CacheEntry::new(payload, self.clock.now_ms(), self.ttl);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        let lru = &mut self.lru;
        self.entries.retain(|key, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                lru.remove(key);
            }
            keep
        });

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
