// ABOUTME: Bounded TTL response cache for external lookups, injectable into adapters
// ABOUTME: LRU eviction on insert, freshness checked on read, expired entries dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Response Cache
//!
//! An explicit cache component owned by the lookup adapter. Entries carry an
//! expiry instant; reads of stale entries evict and miss. Capacity is LRU
//! bounded so a long-running process cannot grow without limit.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL + LRU bounded cache for lookup responses
pub struct ResponseCache<K: Hash + Eq, V: Clone> {
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> ResponseCache<K, V> {
    /// Create a cache holding at most `capacity` entries, each fresh for `ttl`
    #[must_use]
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Get a fresh value, evicting it instead if it has expired
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let fresh = match entries.get(key) {
            None => return None,
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => None,
        };
        if fresh.is_none() {
            entries.pop(key);
        }
        fresh
    }

    /// Insert a value, stamping it with the configured TTL
    pub async fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.lock().await.put(key, entry);
    }

    /// Drop all entries
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of entries currently held, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
