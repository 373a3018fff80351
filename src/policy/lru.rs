//! LRU (Least Recently Used) eviction ledger.
//!
//! Tracks access recency for one partition and names the key touched
//! longest ago as the eviction victim.
//!
//! ## Architecture
//!
//! ```text
//!   head (MRU)                              tail (LRU - EVICT FROM HERE)
//!    ▼                                       ▼
//!   [k3] ◄──► [k1] ◄──► [k4] ◄──► [k2]
//!
//!   record_access(k)   → k moves to head
//!   select_eviction_key → tail key (not removed)
//!   remove_key(k)      → k unlinked
//! ```
//!
//! ## Operations
//!
//! | Operation             | Time |
//! |-----------------------|------|
//! | `record_access`       | O(1) |
//! | `select_eviction_key` | O(1) |
//! | `remove_key`          | O(1) |
//! | `clear`               | O(n) |
//!
//! ## Thread Safety
//!
//! Not thread-safe. A ledger belongs to exactly one partition and is never
//! shared.

use std::hash::Hash;

use crate::ds::RecencyList;
use crate::policy::EvictionPolicy;
use crate::traits::EvictionLedger;

/// Ledger that evicts the least recently accessed key.
#[derive(Debug)]
pub struct LruLedger<K> {
    order: RecencyList<K>,
}

impl<K> LruLedger<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            order: RecencyList::new(),
        }
    }

    /// Creates a ledger with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: RecencyList::with_capacity(capacity),
        }
    }

    /// Iterates tracked keys from most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}

impl<K> Default for LruLedger<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionLedger<K> for LruLedger<K>
where
    K: Clone + Eq + Hash,
{
    fn record_access(&mut self, key: &K) {
        self.order.touch(key);
    }

    fn select_eviction_key(&self) -> Option<K> {
        self.order.least_recent().cloned()
    }

    fn remove_key(&mut self, key: &K) {
        self.order.remove(key);
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }
}
