mod error;
mod limits;
mod splitter;


pub use error::LimitsError;
pub use limits::{
    BatchLimits, BatchLimitsBuilder, DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_RECORD_SIZE,
    DEFAULT_MAX_RECORDS_PER_BATCH,
};
pub use splitter::{
    BatchPartitioner, DroppedRecord, Partition, partition, partition_with_report, record_size,
};
