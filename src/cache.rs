//! N-way set-associative cache.
//!
//! Splits a total capacity into `ways` independent partitions. Every key
//! routes deterministically to exactly one partition, and each partition
//! enforces its own capacity with its own eviction ledger. Filling one
//! partition never evicts keys that live in another.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                SetAssociativeCache<V> { capacity: 8, ways: 4 }           │
//! │                                                                          │
//! │   put(key, value)                                                        │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │   SetSelector ── Int(n) → |n| % 4,  Str(s) → hash31(s) % 4               │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │   ┌────────────┬────────────┬────────────┬────────────┐                  │
//! │   │  set 0     │  set 1     │  set 2     │  set 3     │                  │
//! │   │  cap 2     │  None      │  cap 2     │  cap 2     │  ◄── created on  │
//! │   │  ledger    │  (lazy)    │  ledger    │  ledger    │      first put   │
//! │   │  index     │            │  index     │  index     │                  │
//! │   └────────────┴────────────┴────────────┴────────────┘                  │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time    | Notes                                           |
//! |------------|---------|-------------------------------------------------|
//! | `put`      | O(1)*   | May create the partition; may evict within it   |
//! | `get`      | O(1)*   | A hit refreshes recency in its partition        |
//! | `has`      | O(1)*   | Never touches eviction order                    |
//! | `delete`   | O(1)*   | Removes from storage and ledger                 |
//! | `clear`    | O(n)    | Drops every partition                           |
//! | `list_all` | O(n)    | Partition order, then unspecified within each   |
//!
//! *average, hash-table bound
//!
//! ## Example Usage
//!
//! ```
//! use waycache::cache::SetAssociativeCache;
//! use waycache::policy::EvictionPolicy;
//!
//! // 2 ways of 2 entries each
//! let mut cache = SetAssociativeCache::new(4, 2, EvictionPolicy::Lru)?;
//!
//! cache.put(1, "one");    // set 1
//! cache.put(2, "two");    // set 0
//! cache.put(3, "three");  // set 1
//! cache.get(1);           // 1 is now most recent in set 1
//! cache.put(5, "five");   // set 1 is full: evicts 3
//!
//! assert!(cache.has(1));
//! assert!(cache.has(2));
//! assert!(!cache.has(3));
//! # Ok::<(), waycache::error::CacheError>(())
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Sharing a cache across threads needs external
//! synchronization, at minimum one lock per partition.

use std::fmt;

use crate::builder::SetAssociativeCacheBuilder;
use crate::ds::SetSelector;
use crate::error::{CacheError, ConfigError, InvariantError};
use crate::key::CacheKey;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SetAssociativeMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsSnapshotProvider, PartitionMetricsRecorder,
    ProbeMetricsRecorder,
};
use crate::policy::EvictionPolicy;
use crate::registry::{LedgerConstructor, StorageBackend, StorageConstructor};
use crate::store::traits::PartitionStorage;

type Partition<V> = Box<dyn PartitionStorage<CacheKey, V>>;

/// Validates cache geometry and returns the per-partition capacity.
pub fn partition_capacity(capacity: usize, ways: usize) -> Result<usize, ConfigError> {
    if ways == 0 {
        return Err(ConfigError::new("ways must be > 0"));
    }
    if capacity == 0 {
        return Err(ConfigError::new("capacity must be > 0"));
    }
    if capacity % ways != 0 {
        return Err(ConfigError::new(format!(
            "capacity {capacity} must be a multiple of ways {ways}"
        )));
    }
    Ok(capacity / ways)
}

/// Set-associative cache over [`CacheKey`] keys.
pub struct SetAssociativeCache<V> {
    partitions: Vec<Option<Partition<V>>>,
    selector: SetSelector,
    capacity: usize,
    partition_capacity: usize,
    policy: EvictionPolicy,
    backend: StorageBackend,
    new_ledger: LedgerConstructor,
    new_storage: StorageConstructor<V>,
    #[cfg(feature = "metrics")]
    metrics: SetAssociativeMetrics,
}

impl<V: 'static> SetAssociativeCache<V> {
    /// Creates a cache with the in-memory backend and built-in ledgers.
    ///
    /// # Example
    ///
    /// ```
    /// use waycache::cache::SetAssociativeCache;
    /// use waycache::policy::EvictionPolicy;
    ///
    /// let cache = SetAssociativeCache::<u64>::new(12, 3, EvictionPolicy::Mru).unwrap();
    /// assert_eq!(cache.partition_capacity(), 4);
    /// assert_eq!(cache.partition_count(), 0);
    /// ```
    pub fn new(capacity: usize, ways: usize, policy: EvictionPolicy) -> Result<Self, CacheError> {
        SetAssociativeCacheBuilder::new(capacity, ways)
            .policy(policy)
            .build()
    }

    /// Starts a builder for a cache of `capacity` entries over `ways` sets.
    pub fn builder(capacity: usize, ways: usize) -> SetAssociativeCacheBuilder<V> {
        SetAssociativeCacheBuilder::new(capacity, ways)
    }
}

impl<V> SetAssociativeCache<V> {
    pub(crate) fn from_parts(
        capacity: usize,
        ways: usize,
        policy: EvictionPolicy,
        backend: StorageBackend,
        new_ledger: LedgerConstructor,
        new_storage: StorageConstructor<V>,
    ) -> Result<Self, ConfigError> {
        let partition_capacity = partition_capacity(capacity, ways)?;
        tracing::debug!(
            capacity,
            ways,
            partition_capacity,
            %policy,
            %backend,
            "set-associative cache created"
        );
        Ok(Self {
            partitions: (0..ways).map(|_| None).collect(),
            selector: SetSelector::new(ways)?,
            capacity,
            partition_capacity,
            policy,
            backend,
            new_ledger,
            new_storage,
            #[cfg(feature = "metrics")]
            metrics: SetAssociativeMetrics::default(),
        })
    }

    /// Returns the set index `key` routes to.
    pub fn set_index(&self, key: impl Into<CacheKey>) -> usize {
        self.selector.set_for_key(&key.into())
    }

    /// Inserts or overwrites `key`, returning the entry evicted to make room.
    ///
    /// Only the partition `key` routes to is affected.
    pub fn put(&mut self, key: impl Into<CacheKey>, value: V) -> Option<(CacheKey, V)> {
        let key = key.into();
        let set = self.selector.set_for_key(&key);
        let (new_storage, new_ledger) = (self.new_storage, self.new_ledger);
        let partition_capacity = self.partition_capacity;

        let mut created = false;
        let partition = self.partitions[set].get_or_insert_with(|| {
            created = true;
            new_storage(partition_capacity, new_ledger())
        });
        if created {
            tracing::debug!(set, partition_capacity, "partition created");
            #[cfg(feature = "metrics")]
            self.metrics.record_partition_created();
        }

        #[cfg(feature = "metrics")]
        if partition.has(&key) {
            self.metrics.record_insert_update();
        } else {
            self.metrics.record_insert_new();
        }

        let evicted = partition.add(key, value);
        if let Some((victim, _)) = &evicted {
            tracing::trace!(set, key = %victim, "evicted entry");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
        evicted
    }

    /// Fetches the value for `key`, refreshing its recency on a hit.
    pub fn get(&mut self, key: impl Into<CacheKey>) -> Option<&V> {
        let key = key.into();
        let set = self.selector.set_for_key(&key);
        let value = self.partitions[set]
            .as_mut()
            .and_then(|partition| partition.get(&key));

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }

        value
    }

    /// Returns `true` if `key` is resident. Never changes eviction order.
    pub fn has(&self, key: impl Into<CacheKey>) -> bool {
        let key = key.into();
        let set = self.selector.set_for_key(&key);
        let found = self.partitions[set]
            .as_ref()
            .is_some_and(|partition| partition.has(&key));

        #[cfg(feature = "metrics")]
        if found {
            self.metrics.record_has_hit();
        } else {
            self.metrics.record_has_miss();
        }

        found
    }

    /// Removes `key`, reporting whether it was resident.
    pub fn delete(&mut self, key: impl Into<CacheKey>) -> bool {
        let key = key.into();
        let set = self.selector.set_for_key(&key);
        let removed = self.partitions[set]
            .as_mut()
            .is_some_and(|partition| partition.delete(&key));

        #[cfg(feature = "metrics")]
        self.metrics.record_delete(removed);

        removed
    }

    /// Drops every partition.
    pub fn clear(&mut self) {
        let dropped = self.partition_count();
        self.partitions.iter_mut().for_each(|slot| *slot = None);
        tracing::debug!(partitions = dropped, "cache cleared");

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Every resident entry, in ascending partition order.
    pub fn list_all(&self) -> Vec<(&CacheKey, &V)> {
        self.partitions
            .iter()
            .flatten()
            .flat_map(|partition| partition.list_all())
            .collect()
    }

    /// Consumes the cache, yielding every owned entry in partition order.
    ///
    /// Together with [`Extend`] this moves entries into a cache built with
    /// another policy.
    pub fn into_entries(self) -> Vec<(CacheKey, V)> {
        self.partitions
            .into_iter()
            .flatten()
            .flat_map(|partition| partition.into_entries())
            .collect()
    }

    /// Total number of resident entries.
    pub fn len(&self) -> usize {
        self.partitions.iter().flatten().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().flatten().all(|p| p.is_empty())
    }

    /// Total capacity across all partitions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of sets.
    pub fn ways(&self) -> usize {
        self.selector.ways()
    }

    /// Capacity of each partition.
    pub fn partition_capacity(&self) -> usize {
        self.partition_capacity
    }

    /// Number of partitions materialized so far.
    pub fn partition_count(&self) -> usize {
        self.partitions.iter().flatten().count()
    }

    /// Entries resident in partition `set`; 0 for absent partitions.
    pub fn partition_len(&self, set: usize) -> usize {
        self.partitions
            .get(set)
            .and_then(Option::as_ref)
            .map_or(0, |p| p.len())
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Verifies every partition and that each key sits in its routed set.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (set, slot) in self.partitions.iter().enumerate() {
            let Some(partition) = slot else {
                continue;
            };
            partition.check_invariants()?;
            if partition.capacity() != self.partition_capacity {
                return Err(InvariantError::new(format!(
                    "partition {set} has capacity {}, expected {}",
                    partition.capacity(),
                    self.partition_capacity
                )));
            }
            if let Some((key, _)) = partition
                .list_all()
                .into_iter()
                .find(|(key, _)| self.selector.set_for_key(key) != set)
            {
                return Err(InvariantError::new(format!(
                    "key {key} resides in set {set} but routes elsewhere"
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> Extend<(K, V)> for SetAssociativeCache<V>
where
    K: Into<CacheKey>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> fmt::Debug for SetAssociativeCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetAssociativeCache")
            .field("capacity", &self.capacity)
            .field("ways", &self.ways())
            .field("partition_capacity", &self.partition_capacity)
            .field("partitions", &self.partition_count())
            .field("len", &self.len())
            .field("policy", &self.policy)
            .field("backend", &self.backend)
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl<V> SetAssociativeCache<V> {
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            has_calls: self.metrics.has_calls.get(),
            has_hits: self.metrics.has_hits.get(),
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            delete_calls: self.metrics.delete_calls,
            deleted_entries: self.metrics.deleted_entries,
            clear_calls: self.metrics.clear_calls,
            partitions_created: self.metrics.partitions_created,
            cache_len: self.len(),
            partition_count: self.partition_count(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> MetricsSnapshotProvider<CacheMetricsSnapshot> for SetAssociativeCache<V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lru<V: 'static>(capacity: usize, ways: usize) -> SetAssociativeCache<V> {
        SetAssociativeCache::new(capacity, ways, EvictionPolicy::Lru).unwrap()
    }

    // ==============================================
    // Construction
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn rejects_indivisible_capacity() {
            let err = SetAssociativeCache::<u8>::new(5, 2, EvictionPolicy::Lru).unwrap_err();
            assert!(matches!(err, CacheError::Config(_)));
        }

        #[test]
        fn rejects_zero_geometry() {
            assert!(partition_capacity(0, 1).is_err());
            assert!(partition_capacity(4, 0).is_err());
            assert_eq!(partition_capacity(9, 3), Ok(3));
        }

        #[test]
        fn starts_without_partitions() {
            let cache: SetAssociativeCache<u8> = lru(8, 4);
            assert_eq!(cache.capacity(), 8);
            assert_eq!(cache.ways(), 4);
            assert_eq!(cache.partition_capacity(), 2);
            assert_eq!(cache.partition_count(), 0);
            assert!(cache.is_empty());
            assert_eq!(cache.policy(), EvictionPolicy::Lru);
            assert_eq!(cache.backend(), StorageBackend::InMemory);
        }
    }

    // ==============================================
    // Routing and basic operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn put_then_get_and_has() {
            let mut cache = lru(8, 2);
            cache.put(10, "ten");
            cache.put("name", "value");
            assert_eq!(cache.get(10), Some(&"ten"));
            assert_eq!(cache.get("name"), Some(&"value"));
            assert!(cache.has(10));
            assert!(!cache.has(11));
            assert_eq!(cache.get(11), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn partitions_are_created_lazily() {
            let mut cache = lru(8, 4);
            cache.put(4, 0u8);
            assert_eq!(cache.partition_count(), 1);
            assert_eq!(cache.partition_len(0), 1);
            cache.put(8, 0);
            assert_eq!(cache.partition_count(), 1);
            cache.put(1, 0);
            assert_eq!(cache.partition_count(), 2);
            assert_eq!(cache.partition_len(3), 0);
            assert_eq!(cache.partition_len(99), 0);
        }

        #[test]
        fn lookups_on_missing_partition_report_absent() {
            let mut cache: SetAssociativeCache<u8> = lru(4, 2);
            assert_eq!(cache.get(1), None);
            assert!(!cache.has(1));
            assert!(!cache.delete(1));
            assert_eq!(cache.partition_count(), 0);
        }

        #[test]
        fn set_index_matches_routing() {
            let cache: SetAssociativeCache<u8> = lru(6, 3);
            assert_eq!(cache.set_index(7), 1);
            assert_eq!(cache.set_index(-7), 1);
            let s = cache.set_index("abc");
            assert_eq!(s, (crate::key::hash31("abc") % 3) as usize);
        }

        #[test]
        fn overwrite_keeps_single_entry() {
            let mut cache = lru(4, 2);
            cache.put(1, "a");
            assert_eq!(cache.put(1, "b"), None);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(1), Some(&"b"));
        }

        #[test]
        fn overwrite_in_full_partition_evicts_its_victim() {
            let mut cache = lru(2, 1);
            cache.put(1, 10);
            cache.put(2, 20);
            assert_eq!(cache.put(2, 21), Some((CacheKey::Int(1), 10)));
            assert_eq!(cache.len(), 1);
            assert!(!cache.has(1));
            assert_eq!(cache.get(2), Some(&21));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn delete_removes_entry() {
            let mut cache = lru(4, 2);
            cache.put(1, "a");
            assert!(cache.delete(1));
            assert!(!cache.has(1));
            assert!(!cache.delete(1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn clear_drops_every_partition() {
            let mut cache = lru(8, 4);
            for i in 0..8 {
                cache.put(i, i);
            }
            cache.clear();
            assert!(cache.list_all().is_empty());
            assert_eq!(cache.partition_count(), 0);
            for i in 0..8 {
                assert!(!cache.has(i));
            }
        }

        #[test]
        fn list_all_follows_partition_order() {
            let mut cache = lru(4, 2);
            cache.put(1, 'a');
            cache.put(2, 'b');
            let sets: Vec<_> = cache
                .list_all()
                .into_iter()
                .map(|(key, _)| cache.set_index(key))
                .collect();
            assert_eq!(sets, vec![0, 1]);
        }
    }

    // ==============================================
    // Eviction
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn eviction_stays_within_partition() {
            let mut cache = lru(4, 2);
            cache.put(1, "one");
            cache.put(2, "two");
            cache.get(1);
            assert_eq!(cache.put(3, "three"), None);

            // set 1 now holds {1, 3}; a third odd key evicts the LRU one
            assert_eq!(
                cache.put(5, "five"),
                Some((CacheKey::from(1), "one"))
            );
            assert!(cache.has(2));
            assert_eq!(cache.len(), 3);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn mru_evicts_most_recent_in_partition() {
            let mut cache = SetAssociativeCache::new(4, 2, EvictionPolicy::Mru).unwrap();
            cache.put(1, "one");
            cache.put(3, "three");
            cache.get(1);
            assert_eq!(cache.put(5, "five"), Some((CacheKey::from(1), "one")));
            assert!(cache.has(3));
        }
    }

    // ==============================================
    // Migration
    // ==============================================

    #[test]
    fn entries_move_into_cache_with_other_policy() {
        let mut old = lru(6, 3);
        for i in 0..6 {
            old.put(i, i * 2);
        }
        let mut new = SetAssociativeCache::new(6, 3, EvictionPolicy::Mru).unwrap();
        new.extend(old.into_entries());
        assert_eq!(new.len(), 6);
        for i in 0..6 {
            assert_eq!(new.get(i), Some(&(i * 2)));
        }
        assert!(format!("{new:?}").contains("Mru"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_operations() {
        let mut cache = lru(2, 1);
        cache.put(1, 'a');
        cache.put(1, 'b');
        cache.put(2, 'c');
        cache.put(3, 'd');
        cache.get(3);
        cache.get(1);
        cache.has(2);
        cache.delete(2);
        cache.clear();

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.insert_new, 3);
        assert_eq!(snapshot.insert_updates, 1);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 1);
        assert_eq!(snapshot.has_hits, 1);
        assert_eq!(snapshot.deleted_entries, 1);
        assert_eq!(snapshot.clear_calls, 1);
        assert_eq!(snapshot.partitions_created, 1);
        assert_eq!(snapshot.cache_len, 0);
    }
}
