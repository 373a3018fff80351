//! Deterministic key-to-set routing.
//!
//! Maps a [`CacheKey`] to one of `ways` partitions. Integer keys route by
//! their absolute value; string keys route by the canonical `hash31` of the
//! string, the same hash the per-partition [`HashIndex`](crate::ds::HashIndex)
//! buckets by.
//!
//! ## Architecture
//!
//! ```text
//!   Input Key
//!       │
//!       ▼
//!   ┌──────────────────────────────────────────────┐
//!   │  SetSelector { ways: 4 }                     │
//!   │                                              │
//!   │  Int(n)  → |n|        % 4                    │
//!   │  Str(s)  → hash31(s)  % 4                    │
//!   └──────────────────────────────────────────────┘
//!       │
//!       ▼
//!   Set Index: 0, 1, 2, or 3
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use waycache::ds::SetSelector;
//! use waycache::key::CacheKey;
//!
//! let selector = SetSelector::new(2).unwrap();
//! assert_eq!(selector.set_for_key(&CacheKey::from(1)), 1);
//! assert_eq!(selector.set_for_key(&CacheKey::from(2)), 0);
//! assert_eq!(selector.set_for_key(&CacheKey::from(-3)), 1);
//!
//! // Deterministic
//! let s = selector.set_for_key(&CacheKey::from("user:123"));
//! assert_eq!(selector.set_for_key(&CacheKey::from("user:123")), s);
//! ```

use crate::error::ConfigError;
use crate::key::{CacheKey, hash31};

/// Deterministic set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSelector {
    ways: usize,
}

impl SetSelector {
    /// Creates a selector over `ways` sets. Zero sets is rejected.
    pub fn new(ways: usize) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::new("ways must be > 0"));
        }
        Ok(Self { ways })
    }

    /// Returns the number of sets.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Maps a key to a set index in `[0, ways)`.
    pub fn set_for_key(&self, key: &CacheKey) -> usize {
        let ways = self.ways as u64;
        let index = match key {
            CacheKey::Int(n) => n.unsigned_abs() % ways,
            CacheKey::Str(s) => u64::from(hash31(s)) % ways,
        };
        index as usize
    }
}

impl Default for SetSelector {
    /// Creates a single-set selector.
    fn default() -> Self {
        Self { ways: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_selector_is_deterministic_and_in_range() {
        let selector = SetSelector::new(8).unwrap();
        for i in -100i64..100 {
            let key = CacheKey::from(i);
            let set = selector.set_for_key(&key);
            assert!(set < 8);
            assert_eq!(selector.set_for_key(&key), set);
        }
    }

    #[test]
    fn extreme_integers_stay_in_range() {
        let selector = SetSelector::new(3).unwrap();
        assert!(selector.set_for_key(&CacheKey::from(i64::MIN)) < 3);
        assert!(selector.set_for_key(&CacheKey::from(i64::MAX)) < 3);
    }

    #[test]
    fn strings_route_by_hash31() {
        let selector = SetSelector::new(7).unwrap();
        let key = CacheKey::from("negativeKey");
        assert_eq!(
            selector.set_for_key(&key),
            (hash31("negativeKey") % 7) as usize
        );
    }

    #[test]
    fn zero_ways_is_rejected() {
        let err = SetSelector::new(0).unwrap_err();
        assert_eq!(err.message(), "ways must be > 0");
    }

    #[test]
    fn default_is_a_single_set() {
        let selector = SetSelector::default();
        assert_eq!(selector, SetSelector::new(1).unwrap());
        assert_eq!(selector.set_for_key(&CacheKey::from("x")), 0);
        assert_eq!(selector.set_for_key(&CacheKey::from(-9)), 0);
    }
}
