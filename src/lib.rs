//! Greedy, order-preserving partitioning of text records into size- and
//! count-bounded batches.
//!
//! Record sizes are always measured as UTF-8 byte length, see
//! [`record_size`].

// Public API exports
pub mod config;
pub mod input;
pub mod partitioner;
pub mod scenarios;
pub mod stats;

// Re-export main types for convenience
pub use partitioner::{
    BatchLimits, BatchLimitsBuilder, BatchPartitioner, DEFAULT_MAX_BATCH_SIZE,
    DEFAULT_MAX_RECORD_SIZE, DEFAULT_MAX_RECORDS_PER_BATCH, DroppedRecord, LimitsError, Partition,
    partition, partition_with_report, record_size,
};

pub use config::{LimitsFile, resolve_limits};
pub use input::{InputFormat, read_records, read_records_from};
pub use stats::{BatchStats, RunSummary, batch_stats};
