//! In-memory cache for remote query results.
//!
//! This module provides a bounded, fingerprint-keyed cache guarded by a
//! single lock. It supports:
//!
//! - Interchangeable eviction policies (LRU, LFU, FIFO)
//! - Per-entry TTL with lazy expiration and an optional sweep
//! - Cumulative hit/miss/eviction/expiration statistics
//! - Per-key request coalescing via [`KeyedLocks`]

pub mod clock;
pub mod entry;
pub mod flight;
pub mod key;
pub mod policy;
pub mod query_cache;
pub mod stats;

pub use crate::Error;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use entry::CacheEntry;
pub use flight::KeyedLocks;
pub use key::{CacheKey, QueryFingerprint};
pub use policy::{EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, PolicyKind};
pub use query_cache::QueryCache;
pub use stats::CacheStats;
