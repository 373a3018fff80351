use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, PartitionMetricsRecorder, ProbeMetricsRecorder,
};

/// Counters kept by [`SetAssociativeCache`](crate::cache::SetAssociativeCache).
#[derive(Debug, Default)]
pub struct SetAssociativeMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub has_calls: MetricsCell,
    pub has_hits: MetricsCell,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub delete_calls: u64,
    pub deleted_entries: u64,
    pub clear_calls: u64,
    pub partitions_created: u64,
}

impl CoreMetricsRecorder for SetAssociativeMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_delete(&mut self, removed: bool) {
        self.delete_calls += 1;
        if removed {
            self.deleted_entries += 1;
        }
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl ProbeMetricsRecorder for SetAssociativeMetrics {
    fn record_has_hit(&self) {
        self.has_calls.incr();
        self.has_hits.incr();
    }
    fn record_has_miss(&self) {
        self.has_calls.incr();
    }
}

impl PartitionMetricsRecorder for SetAssociativeMetrics {
    fn record_partition_created(&mut self) {
        self.partitions_created += 1;
    }
}
