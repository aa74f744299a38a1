//! Cache Store Module
//!
//! HashMap-backed TTL cache. Expired entries are dropped lazily when read.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Unbounded key-value cache with per-entry TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Set ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// If the key already exists, the value is overwritten and the TTL reset.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache set");
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` for unknown keys. An expired entry is removed and
    /// reported as `None`.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!(key, ttl_remaining_ms = entry.ttl_remaining_ms(), "cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            if let Some(entry) = self.entries.remove(key) {
                debug!(key, age_ms = entry.age_ms(), "cache entry expired");
            }
        } else {
            debug!(key, "cache miss");
        }
        None
    }

    // == Clear ==
    /// Removes one entry when `key` is given, otherwise every entry.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
