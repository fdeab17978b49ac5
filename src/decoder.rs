//! Binary sample decoder for telemetry metric files
//!
//! Metric files are a flat sequence of fixed-size records written by the
//! instrumented pipeline. Each record is 20 bytes in the host's native byte
//! order: a 32-bit signed value followed by the capture timestamp as two
//! 64-bit signed integers (seconds, nanoseconds).
//!
//! A truncated trailing record is expected (the writer may be interrupted
//! mid-record) and is silently dropped rather than treated as corruption.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Size of one encoded sample record in bytes
pub const RECORD_SIZE: usize = 20;

/// Errors for sample decoding
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot open sample source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// A single decoded telemetry sample
///
/// The timestamp is the record's `seconds + nanoseconds / 1e9`, as unix-epoch
/// seconds. Samples keep file order; the decoder does not enforce timestamp
/// monotonicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Capture time in seconds
    pub timestamp: f64,
    /// Recorded metric value (bytes moved, occupancy percent, ...)
    pub value: i64,
}

/// Decode every complete record in `bytes`, in file order.
///
/// Decoding stops at the first incomplete record: fewer than [`RECORD_SIZE`]
/// bytes remaining yields whatever was decoded so far, never an error. An
/// empty input yields an empty vector.
pub fn decode_samples(bytes: &[u8]) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(bytes.len() / RECORD_SIZE);

    for record in bytes.chunks_exact(RECORD_SIZE) {
        let value = i32::from_ne_bytes(record[0..4].try_into().unwrap());
        let seconds = i64::from_ne_bytes(record[4..12].try_into().unwrap());
        let nanoseconds = i64::from_ne_bytes(record[12..20].try_into().unwrap());

        samples.push(Sample {
            timestamp: seconds as f64 + nanoseconds as f64 / 1e9,
            value: i64::from(value),
        });
    }

    samples
}

/// Read a metric file to completion and decode it.
///
/// The file handle is scoped to this call: opened, read to the end, and
/// closed on every path. A source that cannot be opened or read returns
/// [`DecodeError::SourceUnavailable`]; a readable but empty file is `Ok` with
/// zero samples, so callers can tell "no data" from "no source".
pub fn read_samples(path: &Path) -> Result<Vec<Sample>> {
    let mut file = File::open(path).map_err(|source| DecodeError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| DecodeError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let samples = decode_samples(&bytes);
    tracing::debug!(
        path = %path.display(),
        records = samples.len(),
        trailing_bytes = bytes.len() % RECORD_SIZE,
        "decoded sample file"
    );

    Ok(samples)
}

/// Encode one record in the on-disk layout. Test and tooling helper; the
/// production writer lives in the instrumented pipeline, not here.
pub fn encode_record(value: i32, seconds: i64, nanoseconds: i64) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    record[0..4].copy_from_slice(&value.to_ne_bytes());
    record[4..12].copy_from_slice(&seconds.to_ne_bytes());
    record[12..20].copy_from_slice(&nanoseconds.to_ne_bytes());
    record
}
