//! Eviction policies.
//!
//! A policy only sees keys. It tracks exactly the keys present in the cache
//! and names the next one to discard when the cache is full; the cache owns
//! the entries and performs the removal.
//!
//! | Policy | Victim | Access effect |
//! |--------|--------|---------------|
//! | LRU    | least recently read or written | moves key to most-recent end |
//! | LFU    | lowest frequency, oldest insertion on ties | frequency + 1 |
//! | FIFO   | earliest inserted | none |

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

mod fifo;
mod lfu;
mod lru;

pub use self::fifo::FifoPolicy;
pub use self::lfu::LfuPolicy;
pub use self::lru::LruPolicy;

/// Decides eviction order for a set of tracked keys.
pub trait EvictionPolicy<K>: Send {
    /// Start tracking a newly inserted key. The key must not already be tracked.
    fn on_insert(&mut self, key: K);

    /// Record a read (or overwrite) of `key`.
    ///
    /// Returns `false` if the key was not tracked.
    fn on_access(&mut self, key: &K) -> bool;

    /// Stop tracking `key`. Returns `false` if it was not tracked.
    fn on_remove(&mut self, key: &K) -> bool;

    /// Name the key to evict next without removing it.
    fn select_victim(&self) -> Result<K, Error>;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all tracking state.
    fn clear(&mut self);

    fn kind(&self) -> PolicyKind;
}

/// Selects an eviction policy variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Least Recently Used
    #[default]
    Lru,
    /// Least Frequently Used
    Lfu,
    /// First In First Out
    Fifo,
}

impl PolicyKind {
    /// Create an empty policy of this kind.
    pub fn build<K>(self) -> Box<dyn EvictionPolicy<K>>
    where
        K: Hash + Eq + Clone + Send + 'static,
    {
        match self {
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Lfu => "lfu",
            PolicyKind::Fifo => "fifo",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(PolicyKind::Lru),
            "lfu" => Ok(PolicyKind::Lfu),
            "fifo" => Ok(PolicyKind::Fifo),
            other => Err(Error::InvalidInput(format!("unsupported eviction policy: {other}"))),
        }
    }
}
