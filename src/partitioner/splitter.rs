use super::BatchLimits;
use serde::Serialize;

/// Size of a record as the partitioner sees it: its UTF-8 byte length.
///
/// Rust strings are always UTF-8, so this is `str::len`. Callers must
/// transmit records UTF-8 encoded as well, otherwise the limits checked here
/// no longer describe what goes over the wire.
pub fn record_size(record: &str) -> usize {
    record.len()
}

/// An oversized record that was left out of the batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    /// Position of the record in the input sequence
    pub index: usize,
    /// UTF-8 byte length of the record
    pub size: usize,
}

/// Batches plus the records that could not be placed in any of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<S> {
    pub batches: Vec<Vec<S>>,
    pub dropped: Vec<DroppedRecord>,
}

impl<S> Partition<S> {
    /// Number of records that made it into a batch
    pub fn kept_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn into_batches(self) -> Vec<Vec<S>> {
        self.batches
    }
}

/// Greedy, order-preserving batch partitioner bound to a fixed set of limits
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchPartitioner {
    limits: BatchLimits,
}

impl BatchPartitioner {
    pub fn new(limits: BatchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &BatchLimits {
        &self.limits
    }

    /// See [`partition`]
    pub fn partition<S, I>(&self, records: I) -> Vec<Vec<S>>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        partition(&self.limits, records)
    }

    /// See [`partition_with_report`]
    pub fn partition_with_report<S, I>(&self, records: I) -> Partition<S>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        partition_with_report(&self.limits, records)
    }
}

/// Split records into batches according to `limits`.
///
/// Single greedy pass:
/// - Records larger than `max_record_size` are silently skipped
/// - A batch is closed as soon as the next record would push it past
///   `max_batch_size` bytes or `max_records_per_batch` records
/// - An empty batch always accepts the next record
/// - Input order is kept within and across batches; no batch is empty
pub fn partition<S, I>(limits: &BatchLimits, records: I) -> Vec<Vec<S>>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    partition_with_report(limits, records).into_batches()
}

/// Same as [`partition`], but also reports every dropped record
pub fn partition_with_report<S, I>(limits: &BatchLimits, records: I) -> Partition<S>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let mut batches = Vec::new();
    let mut dropped = Vec::new();
    let mut current_batch: Vec<S> = Vec::new();
    let mut current_bytes = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let size = record_size(record.as_ref());

        if size > limits.max_record_size() {
            tracing::debug!(
                index,
                size,
                max_record_size = limits.max_record_size(),
                "Skipping oversized record"
            );
            dropped.push(DroppedRecord { index, size });
            continue;
        }

        let exceeds_bytes = current_bytes.saturating_add(size) > limits.max_batch_size();
        let exceeds_count = current_batch.len() + 1 > limits.max_records_per_batch();

        if (exceeds_bytes || exceeds_count) && !current_batch.is_empty() {
            batches.push(std::mem::take(&mut current_batch));
            current_bytes = 0;
        }

        current_bytes = current_bytes.saturating_add(size);
        current_batch.push(record);
    }

    if !current_batch.is_empty() {
        batches.push(current_batch);
    }

    tracing::debug!(
        batches = batches.len(),
        dropped = dropped.len(),
        "Partitioned records"
    );

    Partition { batches, dropped }
}

#[cfg(test)]
mod size_tests {
    use super::*;

    #[test]
    fn test_ascii_size_is_length() {
        assert_eq!(record_size(""), 0);
        assert_eq!(record_size("hello"), 5);
        assert_eq!(record_size(&"x".repeat(1024)), 1024);
    }

    #[test]
    fn test_multibyte_size_counts_bytes() {
        assert_eq!(record_size("你好"), 6);
        assert_eq!(record_size("🙂"), 4);
        assert_eq!(record_size("🌍🌎🌏"), 12);
        assert_eq!(record_size("é"), 2);
    }

    #[test]
    fn test_kept_count() {
        let partition = Partition {
            batches: vec![vec!["a", "b"], vec!["c"]],
            dropped: vec![DroppedRecord { index: 3, size: 10 }],
        };
        assert_eq!(partition.kept_count(), 3);
    }
}
