//! Tag-keyed constructor registries.
//!
//! A cache is configured with an [`EvictionPolicy`] tag and a
//! [`StorageBackend`] tag. Each tag is looked up in a registry, a plain map
//! from tag to constructor function, populated before the cache is built.
//! Looking up an unregistered tag is a [`RegistryError`], never a silent
//! default.
//!
//! Registries are ordinary values owned by whoever builds the cache; there is
//! no process-wide registry.
//!
//! ## Example Usage
//!
//! ```
//! use waycache::key::CacheKey;
//! use waycache::policy::{EvictionPolicy, MruLedger};
//! use waycache::registry::EvictionRegistry;
//! use waycache::traits::EvictionLedger;
//!
//! fn scan_resistant() -> Box<dyn EvictionLedger<CacheKey>> {
//!     Box::new(MruLedger::new())
//! }
//!
//! let mut registry = EvictionRegistry::with_builtins();
//! assert!(registry.resolve(EvictionPolicy::Custom("scan")).is_err());
//!
//! registry.register(EvictionPolicy::Custom("scan"), scan_resistant);
//! let ctor = registry.resolve(EvictionPolicy::Custom("scan")).unwrap();
//! assert_eq!(ctor().policy(), EvictionPolicy::Mru);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::RegistryError;
use crate::key::CacheKey;
use crate::policy::{EvictionPolicy, LruLedger, MruLedger};
use crate::store::memory::InMemoryStore;
use crate::store::traits::PartitionStorage;
use crate::traits::EvictionLedger;

/// Builds a fresh, empty ledger for one partition.
pub type LedgerConstructor = fn() -> Box<dyn EvictionLedger<CacheKey>>;

/// Builds a fresh partition of the given capacity around a ledger.
pub type StorageConstructor<V> =
    fn(usize, Box<dyn EvictionLedger<CacheKey>>) -> Box<dyn PartitionStorage<CacheKey, V>>;

/// Tag naming a storage backend in a [`StorageRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageBackend {
    /// [`InMemoryStore`] backed by a chained hash index.
    #[default]
    InMemory,
    /// An externally registered backend.
    Custom(&'static str),
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::InMemory => "in-memory",
            StorageBackend::Custom(name) => name,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn lru_ledger() -> Box<dyn EvictionLedger<CacheKey>> {
    Box::new(LruLedger::new())
}

fn mru_ledger() -> Box<dyn EvictionLedger<CacheKey>> {
    Box::new(MruLedger::new())
}

fn in_memory_store<V: 'static>(
    capacity: usize,
    ledger: Box<dyn EvictionLedger<CacheKey>>,
) -> Box<dyn PartitionStorage<CacheKey, V>> {
    Box::new(InMemoryStore::new(capacity, ledger))
}

// ---------------------------------------------------------------------------
// EvictionRegistry
// ---------------------------------------------------------------------------

/// Map from [`EvictionPolicy`] tag to ledger constructor.
#[derive(Debug, Clone, Default)]
pub struct EvictionRegistry {
    constructors: FxHashMap<EvictionPolicy, LedgerConstructor>,
}

impl EvictionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the LRU and MRU ledgers registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(EvictionPolicy::Lru, lru_ledger);
        registry.register(EvictionPolicy::Mru, mru_ledger);
        registry
    }

    /// Registers `constructor` under `policy`, replacing any previous entry.
    pub fn register(&mut self, policy: EvictionPolicy, constructor: LedgerConstructor) {
        self.constructors.insert(policy, constructor);
    }

    pub fn contains(&self, policy: EvictionPolicy) -> bool {
        self.constructors.contains_key(&policy)
    }

    /// Looks up the constructor for `policy`.
    pub fn resolve(&self, policy: EvictionPolicy) -> Result<LedgerConstructor, RegistryError> {
        self.constructors
            .get(&policy)
            .copied()
            .ok_or_else(|| RegistryError::unregistered_eviction(policy.name()))
    }
}

// ---------------------------------------------------------------------------
// StorageRegistry
// ---------------------------------------------------------------------------

/// Map from [`StorageBackend`] tag to partition constructor.
pub struct StorageRegistry<V> {
    constructors: FxHashMap<StorageBackend, StorageConstructor<V>>,
}

impl<V> StorageRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: FxHashMap::default(),
        }
    }

    /// Registers `constructor` under `backend`, replacing any previous entry.
    pub fn register(&mut self, backend: StorageBackend, constructor: StorageConstructor<V>) {
        self.constructors.insert(backend, constructor);
    }

    pub fn contains(&self, backend: StorageBackend) -> bool {
        self.constructors.contains_key(&backend)
    }

    /// Looks up the constructor for `backend`.
    pub fn resolve(&self, backend: StorageBackend) -> Result<StorageConstructor<V>, RegistryError> {
        self.constructors
            .get(&backend)
            .copied()
            .ok_or_else(|| RegistryError::unregistered_storage(backend.name()))
    }
}

impl<V: 'static> StorageRegistry<V> {
    /// Creates a registry with the in-memory backend registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(StorageBackend::InMemory, in_memory_store::<V>);
        registry
    }
}

impl<V> Default for StorageRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for StorageRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            constructors: self.constructors.clone(),
        }
    }
}

impl<V> fmt::Debug for StorageRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageRegistry")
            .field("backends", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryKind;

    #[test]
    fn builtin_ledgers_resolve_to_their_policy() {
        let registry = EvictionRegistry::with_builtins();
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Mru] {
            assert!(registry.contains(policy));
            let ledger = registry.resolve(policy).unwrap()();
            assert_eq!(ledger.policy(), policy);
            assert!(ledger.is_empty());
        }
    }

    #[test]
    fn empty_registries_fail_explicitly() {
        let err = EvictionRegistry::new()
            .resolve(EvictionPolicy::Lru)
            .unwrap_err();
        assert_eq!(err.kind(), RegistryKind::Eviction);
        assert_eq!(err.tag(), "lru");

        let err = StorageRegistry::<u8>::new()
            .resolve(StorageBackend::InMemory)
            .unwrap_err();
        assert_eq!(err.kind(), RegistryKind::Storage);
        assert_eq!(err.tag(), "in-memory");
    }

    #[test]
    fn unknown_custom_tag_is_not_defaulted() {
        let registry = StorageRegistry::<String>::with_builtins();
        let err = registry.resolve(StorageBackend::Custom("disk")).unwrap_err();
        assert_eq!(err.tag(), "disk");
    }

    #[test]
    fn builtin_storage_builds_bounded_partition() {
        let registry = StorageRegistry::<&'static str>::with_builtins();
        let ctor = registry.resolve(StorageBackend::InMemory).unwrap();
        let mut partition = ctor(1, lru_ledger());
        assert_eq!(partition.capacity(), 1);
        partition.add(CacheKey::from(1), "a");
        assert_eq!(
            partition.add(CacheKey::from(2), "b"),
            Some((CacheKey::from(1), "a"))
        );
    }

    #[test]
    fn register_replaces_previous_constructor() {
        let mut registry = EvictionRegistry::with_builtins();
        registry.register(EvictionPolicy::Lru, mru_ledger);
        let ledger = registry.resolve(EvictionPolicy::Lru).unwrap()();
        assert_eq!(ledger.policy(), EvictionPolicy::Mru);
    }

    #[test]
    fn registries_are_independent_values() {
        let mut a = StorageRegistry::<u32>::with_builtins();
        let b = a.clone();
        a.register(StorageBackend::Custom("other"), in_memory_store::<u32>);
        assert!(a.contains(StorageBackend::Custom("other")));
        assert!(!b.contains(StorageBackend::Custom("other")));
        assert!(format!("{b:?}").contains("InMemory"));
    }
}
