//! MRU (Most Recently Used) eviction ledger.
//!
//! Names the key touched **most** recently as the eviction victim. This is
//! the opposite of LRU and only pays off for cyclic or sequential scans,
//! where the newest key is the least likely to be reused soon.
//!
//! ```text
//!   head (MRU - EVICT FROM HERE)            tail (LRU - keep)
//!    ▼                                       ▼
//!   [k3] ◄──► [k1] ◄──► [k4] ◄──► [k2]
//! ```
//!
//! Not a general-purpose policy: a hot key that is read constantly sits at
//! the head and is the first to go.

use std::hash::Hash;

use crate::ds::RecencyList;
use crate::policy::EvictionPolicy;
use crate::traits::EvictionLedger;

/// Ledger that evicts the most recently accessed key.
#[derive(Debug)]
pub struct MruLedger<K> {
    order: RecencyList<K>,
}

impl<K> MruLedger<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            order: RecencyList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: RecencyList::with_capacity(capacity),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}

impl<K> Default for MruLedger<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionLedger<K> for MruLedger<K>
where
    K: Clone + Eq + Hash,
{
    fn record_access(&mut self, key: &K) {
        self.order.touch(key);
    }

    fn select_eviction_key(&self) -> Option<K> {
        self.order.most_recent().cloned()
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
        EvictionPolicy::Mru
    }
}
