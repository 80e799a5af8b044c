use std::hash::Hash;

use ::lru::LruCache;

use super::{EvictionPolicy, PolicyKind};
use crate::Error;

/// Least-recently-used ordering.
///
/// Backed by an unbounded `LruCache` with unit values: the cache owns the
/// capacity budget, this only keeps recency order.
pub struct LruPolicy<K: Hash + Eq> {
    order: LruCache<K, ()>,
}

impl<K: Hash + Eq> LruPolicy<K> {
    pub fn new() -> Self {
        Self { order: LruCache::unbounded() }
    }
}

impl<K: Hash + Eq> Default for LruPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Hash + Eq + Clone + Send,
{
    fn on_insert(&mut self, key: K) {
        self.order.put(key, ());
    }

    fn on_access(&mut self, key: &K) -> bool {
        if !self.order.contains(key) {
            return false;
        }
        self.order.promote(key);
        true
    }

    fn on_remove(&mut self, key: &K) -> bool {
        self.order.pop(key).is_some()
    }

    fn select_victim(&self) -> Result<K, Error> {
        self.order.peek_lru().map(|(k, _)| k.clone()).ok_or(Error::EmptyPolicy)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victim_is_least_recent() {
        let mut policy = LruPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");
        assert_eq!(policy.select_victim().unwrap(), "a");

        assert!(policy.on_access(&"a"));
        assert_eq!(policy.select_victim().unwrap(), "b");

        assert!(policy.on_access(&"b"));
        assert_eq!(policy.select_victim().unwrap(), "c");
    }

    #[test]
    fn test_select_does_not_remove() {
        let mut policy = LruPolicy::new();
        policy.on_insert(1);
        assert_eq!(policy.select_victim().unwrap(), 1);
        assert_eq!(policy.select_victim().unwrap(), 1);
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_access_untracked() {
        let mut policy: LruPolicy<u8> = LruPolicy::new();
        assert!(!policy.on_access(&9));
        assert!(policy.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut policy = LruPolicy::new();
        policy.on_insert(1);
        policy.on_insert(2);
        policy.clear();
        assert!(policy.is_empty());
        assert_eq!(policy.select_victim(), Err(Error::EmptyPolicy));
    }
}
