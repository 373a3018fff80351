//! waycache: a set-associative cache with pluggable eviction and storage.
//!
//! A cache of total `capacity` is split into `ways` partitions ("sets") of
//! `capacity / ways` entries each. Every key is routed to exactly one set by
//! its canonical hash; eviction is local to that set and decided by the set's
//! own ledger. Ledgers and partition backends are chosen by tag and resolved
//! through per-cache registries when the cache is built.
//!
//! ## Example
//!
//! ```rust
//! use waycache::prelude::*;
//!
//! let mut cache = SetAssociativeCache::new(4, 2, EvictionPolicy::Lru).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(1);
//! assert_eq!(cache.put(3, "three"), None);
//! assert_eq!(cache.len(), 3);
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod key;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod traits;
