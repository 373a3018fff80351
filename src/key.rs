//! Primitive cache keys and the canonical hashing law.
//!
//! Keys are either integers or strings and compare by exact value. Both the
//! partition router and the per-partition hash index derive bucket positions
//! from the same canonical hash, so they always agree on key identity.
//!
//! ## Hashing Law
//!
//! ```text
//!   canonical("user:7") = "user:7"
//!   canonical(-42)      = "-42"
//!
//!   hash31(s) = fold(0, |h, c| h * 31 + c)   over UTF-16 code units of s,
//!               wrapping in a u32 accumulator
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use waycache::key::{CacheKey, CanonicalHash, hash31};
//!
//! assert_eq!(hash31("ab"), 97 * 31 + 98);
//! assert_eq!(CacheKey::from(12).canonical(), "12");
//! assert_eq!(CacheKey::from("12").canonical_hash(), CacheKey::from(12).canonical_hash());
//! ```

use std::borrow::Cow;
use std::fmt;

/// Multiplier of the polynomial rolling hash.
pub const HASH_MULTIPLIER: u32 = 31;

/// Polynomial rolling hash with multiplier 31 over UTF-16 code units.
#[inline]
pub fn hash31(s: &str) -> u32 {
    s.encode_utf16().fold(0u32, |hash, unit| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(u32::from(unit))
    })
}

/// Types that hash through their canonical string form.
pub trait CanonicalHash {
    /// Returns `hash31` of the canonical string form of `self`.
    fn canonical_hash(&self) -> u32;
}

impl CanonicalHash for str {
    fn canonical_hash(&self) -> u32 {
        hash31(self)
    }
}

impl CanonicalHash for String {
    fn canonical_hash(&self) -> u32 {
        hash31(self)
    }
}

impl CanonicalHash for i64 {
    fn canonical_hash(&self) -> u32 {
        hash31(&self.to_string())
    }
}

/// A primitive cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Int(i64),
    Str(String),
}

impl CacheKey {
    /// Returns the canonical string form used for hashing.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            CacheKey::Int(n) => Cow::Owned(n.to_string()),
            CacheKey::Str(s) => Cow::Borrowed(s),
        }
    }

    /// Returns the integer value for integer keys.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CacheKey::Int(n) => Some(*n),
            CacheKey::Str(_) => None,
        }
    }

    /// Returns the string value for string keys.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CacheKey::Int(_) => None,
            CacheKey::Str(s) => Some(s),
        }
    }
}

impl CanonicalHash for CacheKey {
    fn canonical_hash(&self) -> u32 {
        hash31(&self.canonical())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Int(n) => write!(f, "{n}"),
            CacheKey::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for CacheKey {
    fn from(value: i64) -> Self {
        CacheKey::Int(value)
    }
}

impl From<i32> for CacheKey {
    fn from(value: i32) -> Self {
        CacheKey::Int(i64::from(value))
    }
}

impl From<u32> for CacheKey {
    fn from(value: u32) -> Self {
        CacheKey::Int(i64::from(value))
    }
}

impl TryFrom<u64> for CacheKey {
    type Error = std::num::TryFromIntError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(CacheKey::Int)
    }
}

impl TryFrom<usize> for CacheKey {
    type Error = std::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value).map(CacheKey::Int)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        CacheKey::Str(value.to_owned())
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        CacheKey::Str(value)
    }
}

impl From<&CacheKey> for CacheKey {
    fn from(value: &CacheKey) -> Self {
        value.clone()
    }
}
