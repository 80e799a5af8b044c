//! Stored cache record.

use chrono::{DateTime, Utc};

/// A cached query result with its bookkeeping timestamps.
///
/// The value is opaque to the cache. An overwrite through `put` refreshes the
/// entry in place; an entry that has been removed is never revived.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    key: K,
    value: V,
    created_at: DateTime<Utc>,
    last_accessed_at: DateTime<Utc>,
    access_count: u64,
    expires_at: Option<DateTime<Utc>>,
}

impl<K, V> CacheEntry<K, V> {
    pub fn new(key: K, value: V, now: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { key, value, created_at: now, last_accessed_at: now, access_count: 0, expires_at }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// An entry is stale from the instant its expiry is reached.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Record a successful read.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed_at = now.max(self.created_at);
        self.access_count += 1;
    }

    /// Replace value, timestamps and expiry for an overwrite of the same key.
    ///
    /// The access counter survives the overwrite.
    pub fn refresh(&mut self, value: V, now: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) {
        self.value = value;
        self.created_at = now;
        self.last_accessed_at = now;
        self.expires_at = expires_at;
    }
}
