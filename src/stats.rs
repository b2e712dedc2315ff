use crate::partitioner::{Partition, record_size};
use serde::Serialize;

/// Size figures for one emitted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// 1-based position of the batch in the output
    pub index: usize,
    pub records: usize,
    pub bytes: usize,
}

/// Totals for one partitioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub input_records: usize,
    pub batches: usize,
    pub kept_records: usize,
    pub dropped_records: usize,
    pub total_bytes: usize,
    pub per_batch: Vec<BatchStats>,
}

/// Compute record count and UTF-8 byte total for every batch
pub fn batch_stats<S: AsRef<str>>(batches: &[Vec<S>]) -> Vec<BatchStats> {
    batches
        .iter()
        .enumerate()
        .map(|(i, batch)| BatchStats {
            index: i + 1,
            records: batch.len(),
            bytes: batch.iter().map(|r| record_size(r.as_ref())).sum(),
        })
        .collect()
}

impl RunSummary {
    pub fn from_partition<S: AsRef<str>>(input_records: usize, partition: &Partition<S>) -> Self {
        let per_batch = batch_stats(&partition.batches);

        Self {
            input_records,
            batches: per_batch.len(),
            kept_records: per_batch.iter().map(|b| b.records).sum(),
            dropped_records: partition.dropped.len(),
            total_bytes: per_batch.iter().map(|b| b.bytes).sum(),
            per_batch,
        }
    }
}
