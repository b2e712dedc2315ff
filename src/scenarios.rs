//! Built-in demonstration inputs exercising each limit of the partitioner.

use crate::partitioner::{BatchPartitioner, DEFAULT_MAX_RECORD_SIZE};
use crate::stats::RunSummary;

/// A named input for the `demo` command
#[derive(Debug, Clone)]
pub struct Scenario {
    pub description: &'static str,
    pub records: Vec<String>,
}

impl Scenario {
    fn new(description: &'static str, records: Vec<String>) -> Self {
        Self {
            description,
            records,
        }
    }

    /// Partition this scenario's records and summarize the outcome
    pub fn run(&self, partitioner: &BatchPartitioner) -> RunSummary {
        let partition = partitioner.partition_with_report(self.records.iter().map(String::as_str));
        RunSummary::from_partition(self.records.len(), &partition)
    }
}

/// The demo scenarios, sized against the default limits
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Empty input", vec![]),
        Scenario::new("Single small record", vec!["small_record".to_string()]),
        Scenario::new(
            "Record exceeding max size",
            vec!["x".repeat(DEFAULT_MAX_RECORD_SIZE + 1)],
        ),
        Scenario::new(
            "Multiple small records (one batch)",
            vec!["small".to_string(); 10],
        ),
        Scenario::new(
            "Large batch with multiple records",
            vec!["x".repeat(DEFAULT_MAX_RECORD_SIZE / 2); 12],
        ),
        Scenario::new(
            "Exceeding maximum number of records per batch",
            vec!["x".to_string(); 600],
        ),
        Scenario::new(
            "Mixed sizes, skipping invalid records",
            vec![
                "x".repeat(DEFAULT_MAX_RECORD_SIZE - 10),
                "x".repeat(DEFAULT_MAX_RECORD_SIZE + 1),
                "y".repeat(DEFAULT_MAX_RECORD_SIZE - 20),
                "z".repeat(100),
            ],
        ),
        Scenario::new(
            "Large input set exceeding batch size and count",
            vec!["x".repeat(100); 6000],
        ),
        Scenario::new(
            "Unicode characters and varying sizes",
            vec![
                "hello".to_string(),
                "你好".to_string(),
                "🙂".to_string(),
                "🌍🌎🌏".repeat(100_000),
                "short".to_string(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<(&'static str, RunSummary)> {
        let partitioner = BatchPartitioner::default();
        builtin_scenarios()
            .iter()
            .map(|s| (s.description, s.run(&partitioner)))
            .collect()
    }

    #[test]
    fn test_scenario_batch_counts() {
        let counts: Vec<usize> = summaries().iter().map(|(_, s)| s.batches).collect();
        assert_eq!(counts, vec![0, 1, 0, 1, 2, 2, 1, 12, 1]);
    }

    #[test]
    fn test_scenario_drops() {
        let dropped: Vec<usize> = summaries().iter().map(|(_, s)| s.dropped_records).collect();
        assert_eq!(dropped, vec![0, 0, 1, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_unicode_scenario_bytes() {
        let (description, summary) = summaries().pop().unwrap();
        assert_eq!(description, "Unicode characters and varying sizes");
        assert_eq!(summary.kept_records, 4);
        assert_eq!(summary.total_bytes, 20);
    }
}
