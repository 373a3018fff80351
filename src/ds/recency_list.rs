//! Keyed doubly linked recency list backed by `SlotArena`.
//!
//! Stores one node per tracked key in a `SlotArena` and links nodes by
//! `SlotId`; a key → `SlotId` map gives O(1) lookup, so touching or removing
//! a key never scans the order.
//!
//! ## Architecture
//!
//! ```text
//!   slots (FxHashMap<K, SlotId>)      arena (SlotArena<Node<K>>)
//!   ┌──────┬────────┐                 ┌────────┬───────────────────────────────┐
//!   │ "a"  │ id_1   │                 │ id_1   │ { "a", prev: None, next: id_2 }│
//!   │ "b"  │ id_2   │                 │ id_2   │ { "b", prev: id_1, next: id_3 }│
//!   │ "c"  │ id_3   │                 │ id_3   │ { "c", prev: id_2, next: None }│
//!   └──────┴────────┘                 └────────┴───────────────────────────────┘
//!
//!   head (most recent) ─► [a] ◄──► [b] ◄──► [c] ◄── tail (least recent)
//! ```
//!
//! ## Operations
//! - `touch(key)`: push a new key to the head, or move a tracked key there
//! - `remove(key)`: detach + free slot
//! - `most_recent` / `least_recent`: peek either end
//!
//! All of the above are O(1). `iter` walks head to tail in O(n).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Recency order over a set of keys, with no duplicates.
#[derive(Debug)]
pub struct RecencyList<K> {
    arena: SlotArena<Node<K>>,
    slots: FxHashMap<K, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K> RecencyList<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            slots: FxHashMap::default(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Key at the head (most recently touched).
    pub fn most_recent(&self) -> Option<&K> {
        self.head
            .and_then(|id| self.arena.get(id))
            .map(|node| &node.key)
    }

    /// Key at the tail (least recently touched).
    pub fn least_recent(&self) -> Option<&K> {
        self.tail
            .and_then(|id| self.arena.get(id))
            .map(|node| &node.key)
    }

    /// Marks `key` as most recent, tracking it if it was not yet tracked.
    pub fn touch(&mut self, key: &K) {
        match self.slots.get(key).copied() {
            Some(id) => {
                if self.head != Some(id) {
                    self.detach(id);
                    self.attach_front(id);
                }
            },
            None => {
                let id = self.arena.insert(Node {
                    key: key.clone(),
                    prev: None,
                    next: None,
                });
                self.attach_front(id);
                self.slots.insert(key.clone(), id);
            },
        }
    }

    /// Stops tracking `key`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.slots.remove(key) else {
            return false;
        };
        self.detach(id);
        self.arena.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates keys from most to least recent.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            current: self.head,
        }
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            assert!(self.slots.is_empty());
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("node missing");
            assert_eq!(node.prev, prev);
            assert_eq!(self.slots.get(&node.key), Some(&id));
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
        assert_eq!(self.slots.len(), self.len());
    }
}

impl<K> Default for RecencyList<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over keys from most to least recent.
pub struct Iter<'a, K> {
    arena: &'a SlotArena<Node<K>>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.current?)?;
        self.current = node.next;
        Some(&node.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn touch_pushes_and_moves_to_front() {
        let mut list = RecencyList::new();
        list.touch(&"a");
        list.touch(&"b");
        list.touch(&"c");
        assert_eq!(order(&list), vec!["c", "b", "a"]);
        assert_eq!(list.most_recent(), Some(&"c"));
        assert_eq!(list.least_recent(), Some(&"a"));

        list.touch(&"a");
        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.len(), 3);
        list.debug_validate_invariants();
    }

    #[test]
    fn touching_head_is_a_no_op() {
        let mut list = RecencyList::new();
        list.touch(&"a");
        list.touch(&"b");
        list.touch(&"b");
        assert_eq!(order(&list), vec!["b", "a"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        for key in ["a", "b", "c"] {
            list.touch(&key);
        }
        assert!(list.remove(&"b"));
        assert_eq!(order(&list), vec!["c", "a"]);
        assert!(list.remove(&"c"));
        assert_eq!(list.most_recent(), Some(&"a"));
        assert_eq!(list.least_recent(), Some(&"a"));
        assert!(list.remove(&"a"));
        assert!(list.is_empty());
        assert_eq!(list.most_recent(), None);
        assert!(!list.remove(&"a"));
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut list = RecencyList::with_capacity(4);
        list.touch(&1);
        list.touch(&2);
        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(&1));
        assert_eq!(list.least_recent(), None);
        list.touch(&3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3]);
        list.debug_validate_invariants();
    }
}
