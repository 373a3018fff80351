//! Error types for the waycache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache geometry is invalid (zero capacity,
//!   zero ways, capacity not a multiple of ways).
//! - [`RegistryError`]: Returned when an eviction or storage tag has no
//!   registered constructor.
//! - [`CacheError`]: Union of the two, returned by
//!   [`SetAssociativeCacheBuilder::build`](crate::builder::SetAssociativeCacheBuilder::build).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   bookkeeping has drifted.
//!
//! ## Example Usage
//!
//! ```
//! use waycache::cache::SetAssociativeCache;
//! use waycache::error::CacheError;
//! use waycache::policy::EvictionPolicy;
//!
//! let ok = SetAssociativeCache::<String>::new(8, 2, EvictionPolicy::Lru);
//! assert!(ok.is_ok());
//!
//! // 5 entries cannot be split evenly across 2 ways
//! let bad = SetAssociativeCache::<String>::new(5, 2, EvictionPolicy::Lru);
//! assert!(matches!(bad, Err(CacheError::Config(_))));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on the hash index, partition stores and the
/// top-level cache. Carries a human-readable description of which invariant
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Raised synchronously at construction, before any partition exists. Not
/// retryable: the caller has to build again with valid parameters.
///
/// # Example
///
/// ```
/// use waycache::builder::SetAssociativeCacheBuilder;
/// use waycache::error::CacheError;
///
/// let err = SetAssociativeCacheBuilder::<u32>::new(10, 4).build().unwrap_err();
/// match err {
///     CacheError::Config(cfg) => assert!(cfg.to_string().contains("multiple")),
///     other => panic!("unexpected error: {other}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Which registry a failed lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Eviction,
    Storage,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Eviction => f.write_str("eviction policy"),
            RegistryKind::Storage => f.write_str("storage backend"),
        }
    }
}

/// Error returned when a tag has no registered constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    kind: RegistryKind,
    tag: String,
}

impl RegistryError {
    /// Creates an error for an unregistered eviction policy tag.
    pub fn unregistered_eviction(tag: impl Into<String>) -> Self {
        Self {
            kind: RegistryKind::Eviction,
            tag: tag.into(),
        }
    }

    /// Creates an error for an unregistered storage backend tag.
    pub fn unregistered_storage(tag: impl Into<String>) -> Self {
        Self {
            kind: RegistryKind::Storage,
            tag: tag.into(),
        }
    }

    /// Returns the registry the lookup went to.
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Returns the tag that was not found.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {} registered for tag `{}`", self.kind, self.tag)
    }
}

impl std::error::Error for RegistryError {}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned when building a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Invalid capacity/ways geometry.
    Config(ConfigError),
    /// A requested tag is not registered.
    Registry(RegistryError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Config(err) => write!(f, "invalid configuration: {err}"),
            CacheError::Registry(err) => write!(f, "registry lookup failed: {err}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Config(err) => Some(err),
            CacheError::Registry(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CacheError {
    fn from(err: ConfigError) -> Self {
        CacheError::Config(err)
    }
}

impl From<RegistryError> for CacheError {
    fn from(err: RegistryError) -> Self {
        CacheError::Registry(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
