//! Eviction policies.
//!
//! Both ledgers keep the same recency order in a
//! [`RecencyList`](crate::ds::RecencyList); they differ only in which end of
//! it they sacrifice.

use std::fmt;

pub mod lru;
pub mod mru;

pub use lru::LruLedger;
pub use mru::MruLedger;

/// Tag naming an eviction policy in an
/// [`EvictionRegistry`](crate::registry::EvictionRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvictionPolicy {
    /// Least Recently Used eviction.
    #[default]
    Lru,
    /// Most Recently Used eviction.
    Mru,
    /// An externally registered policy.
    Custom(&'static str),
}

impl EvictionPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Mru => "mru",
            EvictionPolicy::Custom(name) => name,
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
