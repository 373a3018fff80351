//! # Metrics Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────┐     ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │     │  ProbeMetricsRecorder       │
//!   │  get_hit/get_miss/insert    │     │  has_hit/has_miss (&self)   │
//!   │  evict/delete/clear         │     └─────────────────────────────┘
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │  PartitionMetricsRecorder   │
//!   │  partition_created          │
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │
//!   └──────────────────────────────┘
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_delete(&mut self, removed: bool);
    fn record_clear(&mut self);
}

/// Counters for `&self` membership probes.
pub trait ProbeMetricsRecorder {
    fn record_has_hit(&self);
    fn record_has_miss(&self);
}

/// Counters specific to lazily materialized partitions.
pub trait PartitionMetricsRecorder: CoreMetricsRecorder {
    fn record_partition_created(&mut self);
}

/// Snapshot metrics for tests and benchmarks.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
