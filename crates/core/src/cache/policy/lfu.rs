use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::{EvictionPolicy, PolicyKind};
use crate::Error;

/// Position of a key in the frequency order: `(frequency, insertion sequence)`.
type Rank = (u64, u64);

/// Least-frequently-used eviction with oldest-insertion tie-break.
///
/// Insertion counts as one use. The ordered index keeps the lowest
/// frequency first and, within a frequency, the earliest insertion first,
/// so victim selection is deterministic.
///
/// Every operation is O(log n) in the number of tracked keys rather than
/// O(1): the ordered index trades constant-time frequency buckets for the
/// exact oldest-insertion tie-break.
pub struct LfuPolicy<K> {
    ranks: HashMap<K, Rank>,
    order: BTreeMap<Rank, K>,
    next_seq: u64,
}

impl<K> LfuPolicy<K> {
    pub fn new() -> Self {
        Self { ranks: HashMap::new(), order: BTreeMap::new(), next_seq: 0 }
    }
}

impl<K> Default for LfuPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> LfuPolicy<K> {
    /// Current frequency of `key`, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.ranks.get(key).map(|(freq, _)| *freq)
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Hash + Eq + Clone + Send,
{
    fn on_insert(&mut self, key: K) {
        let rank = (1, self.next_seq);
        self.next_seq += 1;
        if let Some(stale) = self.ranks.insert(key.clone(), rank) {
            self.order.remove(&stale);
        }
        self.order.insert(rank, key);
    }

    fn on_access(&mut self, key: &K) -> bool {
        let Some(rank) = self.ranks.get_mut(key) else {
            return false;
        };
        let Some(k) = self.order.remove(&*rank) else {
            return false;
        };
        rank.0 += 1;
        self.order.insert(*rank, k);
        true
    }

    fn on_remove(&mut self, key: &K) -> bool {
        match self.ranks.remove(key) {
            Some(rank) => {
                self.order.remove(&rank);
                true
            }
            None => false,
        }
    }

    fn select_victim(&self) -> Result<K, Error> {
        self.order.first_key_value().map(|(_, k)| k.clone()).ok_or(Error::EmptyPolicy)
    }

    fn len(&self) -> usize {
        self.ranks.len()
    }

    fn clear(&mut self) {
        self.ranks.clear();
        self.order.clear();
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victim_is_least_frequent() {
        let mut policy = LfuPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");

        policy.on_access(&"a");
        policy.on_access(&"a");
        policy.on_access(&"b");

        assert_eq!(policy.frequency(&"a"), Some(3));
        assert_eq!(policy.frequency(&"b"), Some(2));
        assert_eq!(policy.frequency(&"c"), Some(1));
        assert_eq!(policy.select_victim().unwrap(), "c");
    }

    #[test]
    fn test_ties_go_to_oldest_insertion() {
        let mut policy = LfuPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");

        // b reaches frequency 2 first, a second; a is still the older insertion
        policy.on_access(&"b");
        policy.on_access(&"a");

        assert_eq!(policy.select_victim().unwrap(), "a");
    }

    #[test]
    fn test_reinsert_starts_at_one() {
        let mut policy = LfuPolicy::new();
        policy.on_insert(1);
        policy.on_insert(2);
        for _ in 0..3 {
            policy.on_access(&1);
        }
        policy.on_remove(&1);
        policy.on_insert(1);

        assert_eq!(policy.frequency(&1), Some(1));
        // 2 is older at the same frequency
        assert_eq!(policy.select_victim().unwrap(), 2);
    }

    #[test]
    fn test_index_stays_consistent() {
        let mut policy = LfuPolicy::new();
        for k in 0..10u32 {
            policy.on_insert(k);
        }
        for k in (0..10u32).step_by(2) {
            policy.on_access(&k);
        }
        for k in 0..5u32 {
            policy.on_remove(&k);
        }
        assert_eq!(policy.len(), 5);
        assert_eq!(policy.order.len(), 5);
        assert_eq!(policy.select_victim().unwrap(), 5);
    }
}
