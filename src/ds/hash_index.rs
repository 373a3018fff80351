//! Separate-chaining hash table with load-factor doubling.
//!
//! The storage primitive behind every partition. Keys are placed by their
//! canonical hash ([`CanonicalHash`]) reduced modulo the bucket count, so the
//! index agrees with the partition router on key identity.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: Vec<Option<SlotId>>          nodes: SlotArena<ChainNode<K, V>>
//!   ┌───┬─────────┐                       ┌────────┬──────────────────────────┐
//!   │ 0 │ None    │                       │ id_0   │ { "a", v0, next: id_2 }  │
//!   │ 1 │ id_0 ───┼──► [id_0] ──► [id_2]  │ id_1   │ { "b", v1, next: None }  │
//!   │ 2 │ id_1 ───┼──► [id_1]             │ id_2   │ { "q", v2, next: None }  │
//!   │ 3 │ None    │                       └────────┴──────────────────────────┘
//!   └───┴─────────┘
//! ```
//!
//! - `set` walks the chain: overwrite on match, append a node otherwise.
//! - After an insertion that grows `len`, if `len / buckets > 0.75` the
//!   bucket array doubles and every node is relinked under the new count.
//!   Nodes stay in the arena during a resize, so no entry is lost or
//!   duplicated and values are never moved.
//!
//! ## Performance
//!
//! - `get` / `set` / `remove`: O(1) average
//! - resize: O(n), amortized O(1) per insertion
//! - `iter`: O(buckets + n), bucket order then chain order
//!
//! ## Example Usage
//!
//! ```
//! use waycache::ds::HashIndex;
//! use waycache::key::CacheKey;
//!
//! let mut index: HashIndex<CacheKey, &str> = HashIndex::with_buckets(2);
//! index.set(CacheKey::from(1), "one");
//! index.set(CacheKey::from("two"), "two");
//! index.set(CacheKey::from(3), "three");
//!
//! assert_eq!(index.get(&CacheKey::from("two")), Some(&"two"));
//! assert_eq!(index.bucket_count(), 4);
//! assert!(index.delete(&CacheKey::from(1)));
//! assert!(!index.has(&CacheKey::from(1)));
//! ```

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;
use crate::key::CanonicalHash;

/// Bucket count used by [`HashIndex::new`].
pub const DEFAULT_BUCKETS: usize = 16;

/// Resize is triggered when `len / buckets` exceeds this ratio.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

#[derive(Debug)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Option<SlotId>,
}

/// Hash table using separate chaining and doubling resize.
#[derive(Debug)]
pub struct HashIndex<K, V> {
    buckets: Vec<Option<SlotId>>,
    nodes: SlotArena<ChainNode<K, V>>,
}

impl<K, V> HashIndex<K, V>
where
    K: CanonicalHash + Eq,
{
    /// Creates an empty index with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates an empty index with `buckets` buckets (at least 1).
    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            buckets: vec![None; buckets.max(1)],
            nodes: SlotArena::new(),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(key: &K, buckets: usize) -> usize {
        key.canonical_hash() as usize % buckets
    }

    fn find(&self, key: &K) -> Option<SlotId> {
        let mut current = self.buckets[Self::bucket_of(key, self.buckets.len())];
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if node.key == *key {
                return Some(id);
            }
            current = node.next;
        }
        None
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key)
            .and_then(|id| self.nodes.get(id))
            .map(|node| &node.value)
    }

    /// Returns `true` if `key` is stored. Has no side effects.
    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `value` under `key`, returning the previous value on overwrite.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let bucket = Self::bucket_of(&key, self.buckets.len());
        let mut tail = None;
        let mut current = self.buckets[bucket];
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(id) else {
                break;
            };
            if node.key == key {
                return Some(std::mem::replace(&mut node.value, value));
            }
            tail = Some(id);
            current = node.next;
        }

        let id = self.nodes.insert(ChainNode {
            key,
            value,
            next: None,
        });
        match tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.buckets[bucket] = Some(id),
        }

        if self.len() as f64 / self.buckets.len() as f64 > LOAD_FACTOR_THRESHOLD {
            self.resize(self.buckets.len() * 2);
        }
        None
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = Self::bucket_of(key, self.buckets.len());
        let mut prev: Option<SlotId> = None;
        let mut current = self.buckets[bucket];
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if node.key == *key {
                let next = node.next;
                match prev.and_then(|p| self.nodes.get_mut(p)) {
                    Some(prev_node) => prev_node.next = next,
                    None => self.buckets[bucket] = next,
                }
                return self.nodes.remove(id).map(|node| node.value);
            }
            prev = Some(id);
            current = node.next;
        }
        None
    }

    /// Removes `key` and reports whether anything was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Empties every bucket. The bucket count is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|head| *head = None);
    }

    fn resize(&mut self, new_buckets: usize) {
        let old = std::mem::replace(&mut self.buckets, vec![None; new_buckets]);
        let mut tails: Vec<Option<SlotId>> = vec![None; new_buckets];

        for head in old {
            let mut current = head;
            while let Some(id) = current {
                let Some(node) = self.nodes.get_mut(id) else {
                    break;
                };
                current = node.next.take();
                let bucket = Self::bucket_of(&node.key, new_buckets);
                match tails[bucket].and_then(|t| self.nodes.get_mut(t)) {
                    Some(tail_node) => tail_node.next = Some(id),
                    None => self.buckets[bucket] = Some(id),
                }
                tails[bucket] = Some(id);
            }
        }

        tracing::trace!(
            buckets = new_buckets,
            entries = self.len(),
            "hash index resized"
        );
    }

    /// Iterates `(key, value)` pairs in bucket order, then chain order.
    ///
    /// The order is stable for a given state.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            index: self,
            bucket: 0,
            current: None,
        }
    }

    /// Iterates stored keys in the same order as [`iter`](Self::iter).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Consumes the index, yielding every owned entry.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.nodes
            .into_values()
            .map(|node| (node.key, node.value))
            .collect()
    }

    /// Verifies chain placement, key uniqueness and the entry count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let buckets = self.buckets.len();
        let mut seen = 0usize;
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut current = *head;
            while let Some(id) = current {
                let node = self
                    .nodes
                    .get(id)
                    .ok_or_else(|| InvariantError::new("chain links to a freed slot"))?;
                if Self::bucket_of(&node.key, buckets) != bucket {
                    return Err(InvariantError::new(format!(
                        "node in bucket {bucket} hashes elsewhere"
                    )));
                }
                if self.find(&node.key) != Some(id) {
                    return Err(InvariantError::new("duplicate key in chain"));
                }
                seen += 1;
                if seen > self.len() {
                    return Err(InvariantError::new("chain cycle or stray node"));
                }
                current = node.next;
            }
        }
        if seen != self.len() {
            return Err(InvariantError::new(format!(
                "chains hold {seen} nodes but len is {}",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<K, V> Default for HashIndex<K, V>
where
    K: CanonicalHash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(&K, &V)` pairs of a [`HashIndex`].
pub struct Iter<'a, K, V> {
    index: &'a HashIndex<K, V>,
    bucket: usize,
    current: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.current {
                let node = self.index.nodes.get(id)?;
                self.current = node.next;
                return Some((&node.key, &node.value));
            }
            let head = self.index.buckets.get(self.bucket)?;
            self.bucket += 1;
            self.current = *head;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::CacheKey;

    /// Key whose hash is fixed, to force collisions.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Colliding(u32, &'static str);

    impl CanonicalHash for Colliding {
        fn canonical_hash(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn set_get_overwrite() {
        let mut index = HashIndex::new();
        assert_eq!(index.set(CacheKey::from(1), "a"), None);
        assert_eq!(index.set(CacheKey::from(1), "b"), Some("a"));
        assert_eq!(index.get(&CacheKey::from(1)), Some(&"b"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&CacheKey::from(2)), None);
    }

    #[test]
    fn collisions_share_a_chain() {
        let mut index = HashIndex::with_buckets(64);
        index.set(Colliding(5, "a"), 1);
        index.set(Colliding(5, "b"), 2);
        index.set(Colliding(5, "c"), 3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&Colliding(5, "b")), Some(&2));

        // remove the middle, then the head, of the chain
        assert_eq!(index.remove(&Colliding(5, "b")), Some(2));
        assert_eq!(index.get(&Colliding(5, "c")), Some(&3));
        assert!(index.delete(&Colliding(5, "a")));
        assert_eq!(index.get(&Colliding(5, "c")), Some(&3));
        assert!(!index.delete(&Colliding(5, "a")));
        index.check_invariants().unwrap();
    }

    #[test]
    fn overwrite_in_chain_does_not_grow() {
        let mut index = HashIndex::with_buckets(64);
        index.set(Colliding(1, "a"), 1);
        index.set(Colliding(1, "b"), 2);
        assert_eq!(index.set(Colliding(1, "b"), 20), Some(2));
        assert_eq!(index.len(), 2);
        let values: Vec<_> = index.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 20]);
    }

    #[test]
    fn resize_doubles_past_threshold() {
        let mut index = HashIndex::with_buckets(4);
        for i in 0..3 {
            index.set(CacheKey::from(i), i);
        }
        // 3 / 4 == 0.75 is not above the threshold
        assert_eq!(index.bucket_count(), 4);
        index.set(CacheKey::from(3), 3);
        assert_eq!(index.bucket_count(), 8);
        index.check_invariants().unwrap();
    }

    #[test]
    fn resize_preserves_every_entry() {
        let mut index = HashIndex::with_buckets(1);
        for i in 0..500i64 {
            index.set(CacheKey::from(i), i * 10);
            index.set(CacheKey::from(format!("s{i}")), -i);
        }
        assert_eq!(index.len(), 1000);
        for i in 0..500i64 {
            assert_eq!(index.get(&CacheKey::from(i)), Some(&(i * 10)));
            assert_eq!(index.get(&CacheKey::from(format!("s{i}"))), Some(&-i));
        }
        assert_eq!(index.iter().count(), 1000);
        index.check_invariants().unwrap();
    }

    #[test]
    fn clear_keeps_bucket_count() {
        let mut index = HashIndex::with_buckets(2);
        for i in 0..10 {
            index.set(CacheKey::from(i), ());
        }
        let buckets = index.bucket_count();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.bucket_count(), buckets);
        assert_eq!(index.iter().count(), 0);
        assert!(!index.has(&CacheKey::from(3)));
    }

    #[test]
    fn iteration_is_stable_for_a_state() {
        let mut index = HashIndex::new();
        for i in 0..20 {
            index.set(CacheKey::from(i), i);
        }
        let first: Vec<_> = index.keys().cloned().collect();
        let second: Vec<_> = index.keys().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn into_entries_returns_owned_pairs() {
        let mut index = HashIndex::new();
        index.set(CacheKey::from("a"), String::from("x"));
        index.set(CacheKey::from("b"), String::from("y"));
        let mut entries = index.into_entries();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                (CacheKey::from("a"), String::from("x")),
                (CacheKey::from("b"), String::from("y")),
            ]
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::key::CacheKey;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        /// Property: the index behaves like a map under any op sequence
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_model_map(
            ops in prop::collection::vec((0u8..3, -50i64..50, any::<u16>()), 0..300)
        ) {
            let mut index: HashIndex<CacheKey, u16> = HashIndex::with_buckets(1);
            let mut model: HashMap<CacheKey, u16> = HashMap::new();

            for (op, key, value) in ops {
                let key = CacheKey::from(key);
                match op {
                    0 => prop_assert_eq!(index.set(key.clone(), value), model.insert(key, value)),
                    1 => prop_assert_eq!(index.remove(&key), model.remove(&key)),
                    _ => prop_assert_eq!(index.get(&key), model.get(&key)),
                }
                prop_assert_eq!(index.len(), model.len());
            }

            index.check_invariants().unwrap();
            for (key, value) in &model {
                prop_assert_eq!(index.get(key), Some(value));
            }
        }
    }
}
