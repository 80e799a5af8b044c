//! Per-key request coalescing.
//!
//! `QueryCache` only keeps its own bookkeeping consistent; it does not stop
//! several callers from missing on the same key and all running the same
//! remote query. `KeyedLocks` hands out one async mutex per key so that the
//! caller holding it computes and stores the value while the others wait and
//! then find it cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-key async locks.
///
/// Slots are held weakly: once every guard and waiter for a key is gone the
/// slot is dead and gets pruned on a later `acquire`.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Weak<AsyncMutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self { slots: Mutex::new(HashMap::new()) }
    }
}

impl<K> KeyedLocks<K>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `key`.
    ///
    /// The returned guard releases the key when dropped.
    pub async fn acquire(&self, key: &K) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock();
            slots.retain(|_, weak| weak.strong_count() > 0);
            match slots.get(key).and_then(Weak::upgrade) {
                Some(slot) => slot,
                None => {
                    let slot = Arc::new(AsyncMutex::new(()));
                    slots.insert(key.clone(), Arc::downgrade(&slot));
                    slot
                }
            }
        };
        slot.lock_owned().await
    }

    /// Number of keys with a live guard or waiter.
    pub fn in_flight(&self) -> usize {
        self.slots.lock().values().filter(|weak| weak.strong_count() > 0).count()
    }
}
