use std::hash::Hash;

use ::lru::LruCache;

use super::{EvictionPolicy, PolicyKind};
use crate::Error;

/// Insertion-order eviction.
///
/// Uses the same linked map as [`super::LruPolicy`] but never promotes, so
/// the least-recent end is always the oldest insertion.
pub struct FifoPolicy<K: Hash + Eq> {
    queue: LruCache<K, ()>,
}

impl<K: Hash + Eq> FifoPolicy<K> {
    pub fn new() -> Self {
        Self { queue: LruCache::unbounded() }
    }
}

impl<K: Hash + Eq> Default for FifoPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Hash + Eq + Clone + Send,
{
    fn on_insert(&mut self, key: K) {
        self.queue.push(key, ());
    }

    fn on_access(&mut self, key: &K) -> bool {
        self.queue.contains(key)
    }

    fn on_remove(&mut self, key: &K) -> bool {
        self.queue.pop(key).is_some()
    }

    fn select_victim(&self) -> Result<K, Error> {
        self.queue.peek_lru().map(|(k, _)| k.clone()).ok_or(Error::EmptyPolicy)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }
}
