//! Storage backends for cache partitions.
//!
//! A backend owns the key/value entries of one partition and couples them to
//! that partition's eviction ledger. Backends are chosen by
//! [`StorageBackend`](crate::registry::StorageBackend) tag through a
//! [`StorageRegistry`](crate::registry::StorageRegistry), never by
//! subclassing in consuming code.

use crate::error::InvariantError;

/// Capability interface of a single bounded partition.
pub trait PartitionStorage<K, V> {
    /// Inserts or overwrites `key`.
    ///
    /// Writing into a full partition first evicts the key the ledger
    /// selects, even when `key` is already resident; the evicted entry is
    /// returned.
    fn add(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Fetches a value; a hit counts as an access for eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Membership probe. Never changes eviction order.
    fn has(&self, key: &K) -> bool;

    /// Removes `key` from storage and from the ledger.
    fn delete(&mut self, key: &K) -> bool;

    /// Empties storage and ledger.
    fn clear(&mut self);

    /// Every resident entry, in unspecified order.
    fn list_all(&self) -> Vec<(&K, &V)>;

    /// Consumes the partition, yielding its owned entries.
    fn into_entries(self: Box<Self>) -> Vec<(K, V)>;

    /// Current number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Verifies the partition's internal bookkeeping.
    fn check_invariants(&self) -> Result<(), InvariantError> {
        Ok(())
    }
}
