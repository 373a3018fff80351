//! # Eviction Ledger Trait
//!
//! A ledger is the access-order bookkeeping one partition consults to pick a
//! victim when it is full. It only orders keys; it never owns values and
//! never removes entries from storage.
//!
//! ## Contract
//!
//! ```text
//!   record_access(k)       k becomes the most recent key; a tracked k is
//!                          moved, never duplicated
//!   select_eviction_key()  names a victim without untracking it; the
//!                          caller removes it from both ledger and store
//!   remove_key(k)          untracks k; no-op for untracked keys
//!   clear()                forgets every key
//! ```
//!
//! The set of tracked keys must always equal the set of keys resident in the
//! owning partition. Every mutating store operation keeps the two in step.
//!
//! ## Implementations
//!
//! | Ledger                                   | Victim                  |
//! |------------------------------------------|-------------------------|
//! | [`LruLedger`](crate::policy::LruLedger)  | least recently accessed |
//! | [`MruLedger`](crate::policy::MruLedger)  | most recently accessed  |
//!
//! ## Example
//!
//! ```
//! use waycache::policy::LruLedger;
//! use waycache::traits::EvictionLedger;
//!
//! let mut ledger = LruLedger::new();
//! ledger.record_access(&"a");
//! ledger.record_access(&"b");
//! ledger.record_access(&"a");
//!
//! assert_eq!(ledger.select_eviction_key(), Some("b"));
//! // selection does not untrack
//! assert_eq!(ledger.len(), 2);
//! ```

use crate::policy::EvictionPolicy;

/// Access-order bookkeeping for one partition.
pub trait EvictionLedger<K> {
    /// Marks `key` as the most recently accessed key.
    fn record_access(&mut self, key: &K);

    /// Returns the key this policy would evict next, if any.
    fn select_eviction_key(&self) -> Option<K>;

    /// Stops tracking `key`. Untracked keys are ignored.
    fn remove_key(&mut self, key: &K);

    /// Forgets every tracked key.
    fn clear(&mut self);

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is tracked.
    fn contains(&self, key: &K) -> bool;

    /// The policy tag this ledger implements.
    fn policy(&self) -> EvictionPolicy;
}
