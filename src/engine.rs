//! Analysis engine: per-stream decode fan-out, synchronization fan-in
//!
//! Each input file is decoded and converted to a rate series on its own
//! worker thread; no state is shared between workers, and each hands its
//! result by value over a channel keyed by label, so completion order does
//! not matter. Synchronization and the bottleneck computation run only after
//! every stream has reported in.
//!
//! Per-stream failures never abort the run: an unreadable file or a stream
//! with too little data is recorded as skipped with its cause, and the
//! remaining streams are still analyzed.

use crate::bottleneck::{self, AverageStat, OVERALL_LABEL};
use crate::cli::RateMode;
use crate::decoder;
use crate::sync::{self, SyncError};
use crate::throughput::{self, RatePoint, DEFAULT_INTERVAL};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::thread;
use thiserror::Error;

/// Errors for a whole analysis run (per-stream failures are skips, not errors)
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no streams specified")]
    NoStreams,
    #[error(transparent)]
    Sync(#[from] SyncError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// One labeled input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSpec {
    pub label: String,
    pub path: PathBuf,
}

impl StreamSpec {
    /// Parse a `LABEL=PATH` argument; a bare `PATH` takes its file stem as
    /// the label.
    pub fn parse(arg: &str) -> Self {
        let (label, path) = match arg.split_once('=') {
            Some((label, path)) if !label.is_empty() => {
                (Some(label.to_string()), PathBuf::from(path))
            }
            Some((_, path)) => (None, PathBuf::from(path)),
            None => (None, PathBuf::from(arg)),
        };

        let label = label.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| arg.to_string())
        });
        Self { label, path }
    }
}

/// Knobs for one analysis run
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Bin width in seconds (binned mode)
    pub interval: f64,
    pub mode: RateMode,
    /// Compute the cross-stream bottleneck series
    pub overall: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            mode: RateMode::Binned,
            overall: true,
        }
    }
}

/// Why a stream produced no series
///
/// `Unreadable` is a failure; `InsufficientSamples` is a defined degenerate
/// case (the file was read fine, it just holds too little data to derive a
/// series). Callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unreadable(String),
    InsufficientSamples { count: usize },
}

impl SkipReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Unreadable(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(cause) => write!(f, "source unavailable: {cause}"),
            SkipReason::InsufficientSamples { count } => {
                write!(f, "insufficient samples ({count})")
            }
        }
    }
}

/// A stream that was excluded from the run, with its cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStream {
    pub label: String,
    pub reason: SkipReason,
}

/// Derived series and average for one analyzed stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamReport {
    pub label: String,
    pub points: Vec<RatePoint>,
    pub average: f64,
}

/// The cross-stream minimum-envelope series and its average
#[derive(Debug, Clone, PartialEq)]
pub struct OverallReport {
    pub points: Vec<RatePoint>,
    pub average: f64,
}

/// Everything one analysis run produced
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Analyzed streams in label order
    pub streams: Vec<StreamReport>,
    pub overall: Option<OverallReport>,
    pub skipped: Vec<SkippedStream>,
}

impl AnalysisReport {
    /// Per-label averages plus one for the overall series, in report order
    pub fn averages(&self) -> Vec<AverageStat> {
        let mut stats: Vec<AverageStat> = self
            .streams
            .iter()
            .map(|s| AverageStat {
                label: s.label.clone(),
                average: s.average,
            })
            .collect();
        if let Some(overall) = &self.overall {
            stats.push(AverageStat {
                label: OVERALL_LABEL.to_string(),
                average: overall.average,
            });
        }
        stats
    }
}

enum StreamOutcome {
    Ready(Vec<RatePoint>),
    Skipped(SkipReason),
}

fn process_stream(spec: &StreamSpec, config: &AnalysisConfig) -> StreamOutcome {
    let samples = match decoder::read_samples(&spec.path) {
        Ok(samples) => samples,
        Err(err) => return StreamOutcome::Skipped(SkipReason::Unreadable(err.to_string())),
    };

    let points = match config.mode {
        RateMode::Binned => throughput::binned_rates(&samples, config.interval).points,
        RateMode::Instant => throughput::instantaneous_rates(&samples),
        RateMode::Raw => throughput::raw_points(&samples),
    };

    if points.is_empty() {
        return StreamOutcome::Skipped(SkipReason::InsufficientSamples {
            count: samples.len(),
        });
    }

    StreamOutcome::Ready(points)
}

/// Run the full analysis: decode and derive every stream in parallel, then
/// synchronize the survivors and compute the bottleneck series.
///
/// Returns `Ok` even when every stream was skipped; the report then carries
/// only the skip causes and the caller decides how fatal that is. Errors only
/// when invoked with zero specs.
pub fn analyze(specs: &[StreamSpec], config: &AnalysisConfig) -> Result<AnalysisReport> {
    if specs.is_empty() {
        return Err(EngineError::NoStreams);
    }

    let (tx, rx) = crossbeam::channel::unbounded();

    // Fan-out: one decode task per stream, each owning its samples until the
    // result is handed over by value. The scope is the fan-in barrier.
    thread::scope(|scope| {
        for spec in specs {
            let tx = tx.clone();
            scope.spawn(move || {
                let outcome = process_stream(spec, config);
                let _ = tx.send((spec.label.clone(), outcome));
            });
        }
    });
    drop(tx);

    let mut series: BTreeMap<String, Vec<RatePoint>> = BTreeMap::new();
    let mut skipped = Vec::new();
    for (label, outcome) in rx.iter() {
        match outcome {
            StreamOutcome::Ready(points) => {
                if series.insert(label.clone(), points).is_some() {
                    tracing::warn!(label = %label, "duplicate stream label, keeping last result");
                }
            }
            StreamOutcome::Skipped(reason) => {
                tracing::warn!(label = %label, %reason, "stream skipped");
                skipped.push(SkippedStream { label, reason });
            }
        }
    }
    skipped.sort_by(|a, b| a.label.cmp(&b.label));

    let overall = if config.overall && !series.is_empty() {
        let synced = sync::synchronize(&series)?;
        let points = bottleneck::overall_minimum(&synced);
        let average = bottleneck::average_rate(&points);
        Some(OverallReport { points, average })
    } else {
        None
    };

    let streams = series
        .into_iter()
        .map(|(label, points)| {
            let average = bottleneck::average_rate(&points);
            StreamReport {
                label,
                points,
                average,
            }
        })
        .collect();

    Ok(AnalysisReport {
        streams,
        overall,
        skipped,
    })
}
