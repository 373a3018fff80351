//! Operation counters for the set-associative cache (feature `metrics`).
//!
//! Recording is split from snapshotting: the cache writes counters through
//! [`traits::CoreMetricsRecorder`] and readers take a
//! [`snapshot::CacheMetricsSnapshot`] through
//! [`traits::MetricsSnapshotProvider`].

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
