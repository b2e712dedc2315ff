use super::LimitsError;
use serde::Serialize;

/// Default per-record limit: 1 MiB
pub const DEFAULT_MAX_RECORD_SIZE: usize = 1024 * 1024;

/// Default per-batch byte limit: 5 MiB
pub const DEFAULT_MAX_BATCH_SIZE: usize = 5 * 1024 * 1024;

/// Default per-batch record count
pub const DEFAULT_MAX_RECORDS_PER_BATCH: usize = 500;

/// Immutable set of limits a partitioning run is checked against.
///
/// All three values are guaranteed non-zero. Construct through
/// [`BatchLimits::builder`] or [`BatchLimits::default`].
///
/// `max_record_size` may be configured larger than `max_batch_size`. In that
/// case a single accepted record can land alone in a batch whose byte total
/// exceeds `max_batch_size`; the partitioner does not try to correct this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchLimits {
    max_record_size: usize,
    max_batch_size: usize,
    max_records_per_batch: usize,
}

impl BatchLimits {
    pub fn builder() -> BatchLimitsBuilder {
        BatchLimitsBuilder::new()
    }

    /// Shorthand for building all three limits at once
    pub fn new(
        max_record_size: usize,
        max_batch_size: usize,
        max_records_per_batch: usize,
    ) -> Result<Self, LimitsError> {
        Self::builder()
            .max_record_size(max_record_size)
            .max_batch_size(max_batch_size)
            .max_records_per_batch(max_records_per_batch)
            .build()
    }

    /// Maximum UTF-8 byte length of a single record
    pub fn max_record_size(&self) -> usize {
        self.max_record_size
    }

    /// Maximum cumulative UTF-8 byte length of a batch
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Maximum number of records in a batch
    pub fn max_records_per_batch(&self) -> usize {
        self.max_records_per_batch
    }

    /// True when a lone record may overflow `max_batch_size`
    pub fn allows_batch_overflow(&self) -> bool {
        self.max_record_size > self.max_batch_size
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_records_per_batch: DEFAULT_MAX_RECORDS_PER_BATCH,
        }
    }
}

/// Mutable builder for [`BatchLimits`], seeded with the defaults
#[derive(Debug, Clone)]
pub struct BatchLimitsBuilder {
    max_record_size: usize,
    max_batch_size: usize,
    max_records_per_batch: usize,
}

impl BatchLimitsBuilder {
    pub fn new() -> Self {
        Self {
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_records_per_batch: DEFAULT_MAX_RECORDS_PER_BATCH,
        }
    }

    /// Set maximum individual record size in bytes
    pub fn max_record_size(mut self, size: usize) -> Self {
        self.max_record_size = size;
        self
    }

    /// Set maximum total batch size in bytes
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Set maximum record count per batch
    pub fn max_records_per_batch(mut self, count: usize) -> Self {
        self.max_records_per_batch = count;
        self
    }

    /// Validate and freeze the limits
    pub fn build(self) -> Result<BatchLimits, LimitsError> {
        for (name, value) in [
            ("max_record_size", self.max_record_size),
            ("max_batch_size", self.max_batch_size),
            ("max_records_per_batch", self.max_records_per_batch),
        ] {
            if value == 0 {
                return Err(LimitsError::ZeroLimit { name });
            }
        }

        let limits = BatchLimits {
            max_record_size: self.max_record_size,
            max_batch_size: self.max_batch_size,
            max_records_per_batch: self.max_records_per_batch,
        };

        if limits.allows_batch_overflow() {
            tracing::warn!(
                max_record_size = limits.max_record_size,
                max_batch_size = limits.max_batch_size,
                "max_record_size exceeds max_batch_size; a single record may overflow its batch"
            );
        }

        Ok(limits)
    }
}

impl Default for BatchLimitsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
