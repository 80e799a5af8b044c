//! Thread-safe query result cache with pluggable eviction.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::entry::CacheEntry;
use super::policy::{EvictionPolicy, PolicyKind};
use super::stats::CacheStats;
use crate::Error;
use crate::config::CacheConfig;

/// Fingerprint-keyed store of computed query results.
///
/// Entries, eviction bookkeeping and counters sit behind one lock and are
/// always updated together. No operation performs I/O while holding it.
/// Values are handed out as clones; wrap large payloads in `Arc`.
pub struct QueryCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    kind: PolicyKind,
    default_ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<K, V>>,
    policy: Box<dyn EvictionPolicy<K>>,
    stats: CacheStats,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    /// Remove an entry and its tracking record.
    fn remove(&mut self, key: &K) -> Option<CacheEntry<K, V>> {
        let entry = self.entries.remove(key)?;
        if !self.policy.on_remove(key) {
            tracing::error!(?key, policy = %self.policy.kind(), "removed key was not tracked by eviction policy");
        }
        Some(entry)
    }

    /// Evict the policy's victim.
    fn evict_one(&mut self) -> Result<(), Error> {
        let victim = self.policy.select_victim()?;
        let entry = self.entries.remove(&victim);
        self.policy.on_remove(&victim);
        match entry {
            Some(_) => {
                self.stats.record_eviction();
                tracing::debug!(key = ?victim, policy = %self.policy.kind(), "evicted cache entry");
            }
            None => tracing::error!(key = ?victim, "eviction victim had no cache entry"),
        }
        Ok(())
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Hash + Eq + Clone + Send + fmt::Debug + 'static,
    V: Clone,
{
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCapacity` if `capacity` is 0.
    pub fn new(capacity: usize, kind: PolicyKind) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity.min(1024)),
                policy: kind.build(),
                stats: CacheStats::default(),
            }),
            capacity,
            kind,
            default_ttl: None,
            clock: Arc::new(SystemClock),
        })
    }

    /// Build a cache from the `[cache]` configuration section.
    pub fn from_config(config: &CacheConfig) -> Result<Self, Error> {
        Self::new(config.capacity, config.policy)?.with_default_ttl(config.default_ttl())
    }

    /// TTL applied when `put` is called without one.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTtl` if the TTL is zero or negative.
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Result<Self, Error> {
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
        }
        self.default_ttl = ttl;
        Ok(self)
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Look up a cached value.
    ///
    /// Expired entries are removed on sight and reported as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let Some(entry) = inner.entries.get_mut(key) else {
            inner.stats.record_miss();
            tracing::debug!(?key, "cache miss");
            return None;
        };

        if entry.is_expired(now) {
            inner.remove(key);
            inner.stats.record_expiration();
            inner.stats.record_miss();
            tracing::debug!(?key, "cache entry expired");
            return None;
        }

        entry.touch(now);
        let value = entry.value().clone();
        if !inner.policy.on_access(key) {
            tracing::error!(?key, policy = %self.kind, "cache hit on key unknown to eviction policy");
        }
        inner.stats.record_hit();
        tracing::debug!(?key, "cache hit");

        Some(value)
    }

    /// Insert or overwrite a value.
    ///
    /// `ttl` overrides the default TTL; `None` falls back to it, and with no
    /// default the entry never expires. Overwriting an existing key resets its
    /// expiry to the new TTL and counts as a use for eviction purposes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTtl` for a zero or negative `ttl`, and
    /// `Error::EmptyPolicy` if eviction bookkeeping has drifted from the
    /// stored entries.
    pub fn put(&self, key: K, value: V, ttl: Option<Duration>) -> Result<(), Error> {
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
        }

        let now = self.clock.now();
        let expires_at = expiry(now, ttl.or(self.default_ttl));

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.refresh(value, now, expires_at);
            if !inner.policy.on_access(&key) {
                tracing::error!(?key, policy = %self.kind, "overwritten key unknown to eviction policy");
            }
            return Ok(());
        }

        while inner.entries.len() >= self.capacity {
            inner.evict_one()?;
        }

        inner.entries.insert(key.clone(), CacheEntry::new(key.clone(), value, now, expires_at));
        inner.policy.on_insert(key);

        Ok(())
    }

    /// Drop a single entry. Returns whether anything was removed.
    pub fn invalidate(&self, key: &K) -> bool {
        let removed = self.inner.lock().remove(key).is_some();
        if removed {
            tracing::debug!(?key, "cache entry invalidated");
        }
        removed
    }

    /// Remove every entry. Statistics keep their cumulative values.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let cleared = inner.entries.len();
        inner.entries.clear();
        inner.policy.clear();
        cleared
    }

    /// Remove every expired entry, returning how many were dropped.
    ///
    /// Counts expirations but not misses, since nobody asked for these keys.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired: Vec<K> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove(key);
            inner.stats.record_expiration();
        }

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "purged expired cache entries");
        }
        expired.len()
    }

    /// Whether a live entry exists for `key`. Does not count as a lookup.
    pub fn contains(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.inner
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Snapshot of the cumulative counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}

fn validate_ttl(ttl: Duration) -> Result<(), Error> {
    if ttl <= Duration::zero() {
        return Err(Error::InvalidTtl(ttl.num_seconds()));
    }
    Ok(())
}

/// Absolute expiry; a TTL too large to represent never expires.
fn expiry(now: DateTime<Utc>, ttl: Option<Duration>) -> Option<DateTime<Utc>> {
    ttl.and_then(|ttl| now.checked_add_signed(ttl))
}

impl<K, V> fmt::Debug for QueryCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("QueryCache")
            .field("capacity", &self.capacity)
            .field("policy", &self.kind)
            .field("default_ttl", &self.default_ttl)
            .field("current_entries", &inner.entries.len())
            .field("stats", &inner.stats)
            .finish()
    }
}
