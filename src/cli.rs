//! CLI argument parsing for Caudal

use clap::{Parser, ValueEnum};

/// How a rate series is derived from a decoded sample stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RateMode {
    /// Sum values into fixed-width time bins and divide by the bin width
    Binned,
    /// Point-to-point rate between adjacent samples
    Instant,
    /// Expose sample values unchanged (occupancy traces)
    Raw,
}

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "caudal")]
#[command(version)]
#[command(
    about = "Throughput and occupancy analyzer for binary telemetry sample files",
    long_about = None
)]
pub struct Cli {
    /// Metric streams as LABEL=PATH pairs (a bare PATH uses its file stem as label)
    #[arg(value_name = "STREAM", required = true)]
    pub streams: Vec<String>,

    /// Bin width in seconds for binned mode
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "SECONDS",
        default_value = "0.1",
        allow_hyphen_values = true
    )]
    pub interval: f64,

    /// Rate derivation mode
    #[arg(long = "mode", value_enum, default_value = "binned")]
    pub mode: RateMode,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Skip the cross-stream bottleneck (per-instant minimum) computation
    #[arg(long = "no-overall")]
    pub no_overall: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
