//! `recbatch`: split text records into upload-sized batches.
//!
//! ```text
//! recbatch split  --input records.txt [--format lines|json] [--output batches|summary] [--report]
//! recbatch demo
//! recbatch limits
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use recbatch::scenarios::builtin_scenarios;
use recbatch::{
    BatchLimits, BatchPartitioner, DroppedRecord, InputFormat, LimitsFile, RunSummary,
    read_records_from, resolve_limits,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recbatch",
    about = "Split text records into size- and count-bounded batches",
    long_about = "
Greedy, order-preserving batch partitioner. Records are measured in UTF-8 bytes.
Records larger than --max-record-size are skipped.

Limits are resolved as: built-in defaults, then --config <file.json>, then flags.
Set RUST_LOG to control log output (written to stderr).
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with max_record_size / max_batch_size / max_records_per_batch
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum bytes per record (default 1 MiB)
    #[arg(long, global = true)]
    max_record_size: Option<usize>,

    /// Maximum bytes per batch (default 5 MiB)
    #[arg(long, global = true)]
    max_batch_size: Option<usize>,

    /// Maximum records per batch (default 500)
    #[arg(long, global = true)]
    max_records_per_batch: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition records read from a file or stdin
    Split {
        /// Input path, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Input layout
        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        format: InputFormat,
        /// What to print
        #[arg(long, value_enum, default_value_t = OutputMode::Batches)]
        output: OutputMode,
        /// Also list skipped oversized records
        #[arg(long)]
        report: bool,
    },

    /// Run the built-in scenarios and print per-batch statistics
    Demo,

    /// Print the effective limits as JSON
    Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// JSON array of batches
    Batches,
    /// Human readable counts and byte totals
    Summary,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    batches: &'a [Vec<String>],
    dropped: &'a [DroppedRecord],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = LimitsFile {
        max_record_size: cli.max_record_size,
        max_batch_size: cli.max_batch_size,
        max_records_per_batch: cli.max_records_per_batch,
    };
    let limits = resolve_limits(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Split {
            input,
            format,
            output,
            report,
        } => run_split(limits, &input, format, output, report),
        Commands::Demo => {
            run_demo(limits);
            Ok(())
        }
        Commands::Limits => {
            println!("{}", serde_json::to_string_pretty(&limits)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "recbatch=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_split(
    limits: BatchLimits,
    input: &str,
    format: InputFormat,
    output: OutputMode,
    report: bool,
) -> Result<()> {
    let records = read_records_from(input, format)?;
    let input_count = records.len();

    let partition = BatchPartitioner::new(limits).partition_with_report(records);

    match output {
        OutputMode::Batches if report => {
            let out = ReportOutput {
                batches: &partition.batches,
                dropped: &partition.dropped,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputMode::Batches => {
            println!("{}", serde_json::to_string_pretty(&partition.batches)?);
        }
        OutputMode::Summary => {
            let summary = RunSummary::from_partition(input_count, &partition);
            print_summary(&summary);

            if report {
                for dropped in &partition.dropped {
                    println!(
                        "  Skipped record {}: {} bytes (max: {})",
                        dropped.index,
                        dropped.size,
                        limits.max_record_size()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_demo(limits: BatchLimits) {
    let partitioner = BatchPartitioner::new(limits);

    for scenario in builtin_scenarios() {
        println!("Test: {}", scenario.description);
        print_summary(&scenario.run(&partitioner));
        println!("{}", "-".repeat(50));
    }
}

fn print_summary(summary: &RunSummary) {
    println!("Number of input records: {}", summary.input_records);
    println!("Number of output batches: {}", summary.batches);
    for batch in &summary.per_batch {
        println!(
            "  Batch {}: {} records, {} bytes",
            batch.index, batch.records, batch.bytes
        );
    }
    if summary.dropped_records > 0 {
        println!("Skipped oversized records: {}", summary.dropped_records);
    }
}
