pub use crate::builder::SetAssociativeCacheBuilder;
pub use crate::cache::SetAssociativeCache;
pub use crate::ds::{HashIndex, RecencyList, SetSelector, SlotArena, SlotId};
pub use crate::error::{CacheError, ConfigError, InvariantError, RegistryError, RegistryKind};
pub use crate::key::{CacheKey, CanonicalHash, hash31};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::{EvictionPolicy, LruLedger, MruLedger};
pub use crate::registry::{EvictionRegistry, StorageBackend, StorageRegistry};
pub use crate::store::{InMemoryStore, PartitionStorage};
pub use crate::traits::EvictionLedger;
