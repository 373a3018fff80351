//! In-memory partition store.
//!
//! ## Architecture
//! - Entries live in a [`HashIndex`] (separate chaining, doubling resize).
//! - Access order lives in a boxed [`EvictionLedger`] owned by this store
//!   alone; ledgers are never shared across partitions.
//! - Capacity is enforced by entry count and fixed at construction.
//!
//! ## Core Operations
//! - `add`: evict-before-insert whenever the store is full, then set and
//!   record the access (for new and overwritten keys alike). Overwriting in
//!   a full store therefore still evicts the ledger's victim, which may be
//!   the key being written.
//! - `get`: a hit records an access.
//! - `has`: pure probe, the ledger is not touched.
//! - `delete`: removes from the index, then untracks in the ledger.
//!
//! ## Example Usage
//! ```rust
//! use waycache::policy::LruLedger;
//! use waycache::store::memory::InMemoryStore;
//! use waycache::store::traits::PartitionStorage;
//!
//! let mut store = InMemoryStore::new(2, Box::new(LruLedger::<i64>::new()));
//! store.add(1i64, "a");
//! store.add(2i64, "b");
//! store.get(&1);
//! assert_eq!(store.add(3i64, "c"), Some((2, "b")));
//! assert!(store.has(&1));
//! ```

use std::fmt;

use crate::ds::HashIndex;
use crate::error::InvariantError;
use crate::key::CanonicalHash;
use crate::store::traits::PartitionStorage;
use crate::traits::EvictionLedger;

/// Single partition backed by a [`HashIndex`] and an [`EvictionLedger`].
pub struct InMemoryStore<K, V> {
    index: HashIndex<K, V>,
    ledger: Box<dyn EvictionLedger<K>>,
    capacity: usize,
}

impl<K, V> InMemoryStore<K, V>
where
    K: CanonicalHash + Eq,
{
    /// Creates an empty store holding at most `capacity` entries.
    pub fn new(capacity: usize, ledger: Box<dyn EvictionLedger<K>>) -> Self {
        Self {
            index: HashIndex::new(),
            ledger,
            capacity,
        }
    }

    /// Fetches a value without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key)
    }

    /// The ledger ordering this store.
    pub fn ledger(&self) -> &dyn EvictionLedger<K> {
        self.ledger.as_ref()
    }

    /// Evicts the ledger's victim from the index, then untracks it.
    ///
    /// A victim the index does not hold is untracked and the next one is
    /// tried, so a misbehaving ledger cannot let the store outgrow capacity.
    fn evict_one(&mut self) -> Option<(K, V)> {
        for _ in 0..=self.ledger.len() {
            let victim = self.ledger.select_eviction_key()?;
            let value = self.index.remove(&victim);
            self.ledger.remove_key(&victim);
            match value {
                Some(value) => return Some((victim, value)),
                None => tracing::warn!(
                    ledger_len = self.ledger.len(),
                    index_len = self.index.len(),
                    "eviction victim not resident in partition"
                ),
            }
        }
        None
    }
}

impl<K, V> PartitionStorage<K, V> for InMemoryStore<K, V>
where
    K: CanonicalHash + Eq,
{
    fn add(&mut self, key: K, value: V) -> Option<(K, V)> {
        let evicted = if self.index.len() >= self.capacity {
            self.evict_one()
        } else {
            None
        };
        self.ledger.record_access(&key);
        self.index.set(key, value);
        evicted
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.index.has(key) {
            self.ledger.record_access(key);
        }
        self.index.get(key)
    }

    fn has(&self, key: &K) -> bool {
        self.index.has(key)
    }

    fn delete(&mut self, key: &K) -> bool {
        if self.index.delete(key) {
            self.ledger.remove_key(key);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.index.clear();
        self.ledger.clear();
    }

    fn list_all(&self) -> Vec<(&K, &V)> {
        self.index.iter().collect()
    }

    fn into_entries(self: Box<Self>) -> Vec<(K, V)> {
        self.index.into_entries()
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.index.check_invariants()?;
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "partition holds {} entries over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.ledger.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "ledger tracks {} keys but index holds {}",
                self.ledger.len(),
                self.index.len()
            )));
        }
        if self.index.keys().any(|key| !self.ledger.contains(key)) {
            return Err(InvariantError::new("resident key missing from ledger"));
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for InMemoryStore<K, V>
where
    K: CanonicalHash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.ledger.policy())
            .finish()
    }
}
