//! Builder for set-associative caches.
//!
//! Collects geometry, the eviction policy tag, the storage backend tag and
//! the registries those tags are resolved against. Both tags are resolved
//! once, in [`build`](SetAssociativeCacheBuilder::build), so an unregistered
//! tag fails construction instead of a later `put`. The resolved
//! constructors are then invoked once per newly created partition.
//!
//! ## Example
//!
//! ```rust
//! use waycache::builder::SetAssociativeCacheBuilder;
//! use waycache::policy::EvictionPolicy;
//! use waycache::registry::StorageBackend;
//!
//! let mut cache = SetAssociativeCacheBuilder::new(100, 4)
//!     .policy(EvictionPolicy::Mru)
//!     .backend(StorageBackend::InMemory)
//!     .build()
//!     .unwrap();
//! cache.put("greeting", "hello".to_string());
//! assert_eq!(cache.get("greeting"), Some(&"hello".to_string()));
//! ```

use std::fmt;

use crate::cache::SetAssociativeCache;
use crate::error::CacheError;
use crate::policy::EvictionPolicy;
use crate::registry::{EvictionRegistry, StorageBackend, StorageRegistry};

/// Builder for [`SetAssociativeCache`].
pub struct SetAssociativeCacheBuilder<V> {
    capacity: usize,
    ways: usize,
    policy: EvictionPolicy,
    backend: StorageBackend,
    evictions: EvictionRegistry,
    storages: StorageRegistry<V>,
}

impl<V: 'static> SetAssociativeCacheBuilder<V> {
    /// Starts a builder with LRU eviction, the in-memory backend and the
    /// built-in registries.
    pub fn new(capacity: usize, ways: usize) -> Self {
        Self {
            capacity,
            ways,
            policy: EvictionPolicy::default(),
            backend: StorageBackend::default(),
            evictions: EvictionRegistry::with_builtins(),
            storages: StorageRegistry::with_builtins(),
        }
    }
}

impl<V> SetAssociativeCacheBuilder<V> {
    /// Sets the eviction policy tag.
    pub fn policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the storage backend tag.
    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Replaces the registry the policy tag is resolved against.
    pub fn eviction_registry(mut self, registry: EvictionRegistry) -> Self {
        self.evictions = registry;
        self
    }

    /// Replaces the registry the backend tag is resolved against.
    pub fn storage_registry(mut self, registry: StorageRegistry<V>) -> Self {
        self.storages = registry;
        self
    }

    /// Validates geometry, resolves both tags and builds the cache.
    ///
    /// Geometry is checked first; no partition exists until the first `put`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waycache::builder::SetAssociativeCacheBuilder;
    /// use waycache::error::CacheError;
    /// use waycache::registry::StorageBackend;
    ///
    /// let err = SetAssociativeCacheBuilder::<u32>::new(8, 2)
    ///     .backend(StorageBackend::Custom("disk"))
    ///     .build()
    ///     .unwrap_err();
    /// assert!(matches!(err, CacheError::Registry(_)));
    /// ```
    pub fn build(self) -> Result<SetAssociativeCache<V>, CacheError> {
        crate::cache::partition_capacity(self.capacity, self.ways)?;
        let new_ledger = self.evictions.resolve(self.policy)?;
        let new_storage = self.storages.resolve(self.backend)?;
        let cache = SetAssociativeCache::from_parts(
            self.capacity,
            self.ways,
            self.policy,
            self.backend,
            new_ledger,
            new_storage,
        )?;
        Ok(cache)
    }
}

impl<V> fmt::Debug for SetAssociativeCacheBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetAssociativeCacheBuilder")
            .field("capacity", &self.capacity)
            .field("ways", &self.ways)
            .field("policy", &self.policy)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
