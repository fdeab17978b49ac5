use anyhow::Result;
use caudal::cli::{Cli, OutputFormat};
use caudal::csv_output::CsvReport;
use caudal::engine::{self, AnalysisConfig, AnalysisReport, StreamSpec};
use caudal::json_output::JsonReport;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the human-readable summary: per-stream averages, the overall
/// bottleneck average, and one line per skipped stream with its cause.
fn print_summary(report: &AnalysisReport) {
    println!("{:<24} {:>16}", "stream", "average");
    println!("------------------------ ----------------");
    for stream in &report.streams {
        println!("{:<24} {:>16.2}", stream.label, stream.average);
    }
    if let Some(overall) = &report.overall {
        println!("------------------------ ----------------");
        println!("{:<24} {:>16.2}", "overall", overall.average);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("skipped:");
        for skip in &report.skipped {
            println!("  {}: {}", skip.label, skip.reason);
        }
    }
}

fn print_skips_to_stderr(report: &AnalysisReport) {
    for skip in &report.skipped {
        eprintln!("skipped {}: {}", skip.label, skip.reason);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if !(cli.interval > 0.0) {
        anyhow::bail!("--interval must be positive, got {}", cli.interval);
    }

    let specs: Vec<StreamSpec> = cli.streams.iter().map(|s| StreamSpec::parse(s)).collect();
    let config = AnalysisConfig {
        interval: cli.interval,
        mode: cli.mode,
        overall: !cli.no_overall,
    };

    let report = engine::analyze(&specs, &config)?;

    match cli.format {
        OutputFormat::Text => print_summary(&report),
        OutputFormat::Json => println!("{}", JsonReport::from_report(&report).to_json()?),
        OutputFormat::Csv => {
            print_skips_to_stderr(&report);
            print!("{}", CsvReport::new(&report).render());
        }
    }

    if report.streams.is_empty() {
        anyhow::bail!("no stream could be analyzed");
    }

    Ok(())
}
