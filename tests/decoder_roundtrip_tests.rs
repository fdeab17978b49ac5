//! Decoder round-trip and truncation-tolerance tests against real files
//!
//! The writer side lives in the instrumented pipeline; these tests reproduce
//! its record layout bit-for-bit and verify the decoder recovers exactly what
//! was written, including when the file ends mid-record.

use caudal::decoder::{decode_samples, encode_record, read_samples, RECORD_SIZE};
use caudal::throughput::{binned_rates, DEFAULT_INTERVAL};
use caudal::bottleneck::average_rate;
use std::io::Write;
use std::path::PathBuf;

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

#[test]
fn test_round_trip_decode() {
    let records: Vec<(i32, i64, i64)> = vec![
        (0, 0, 0),
        (1024, 1_700_000_000, 0),
        (-500, 1_700_000_001, 999_999_999),
        (i32::MAX, 1_700_000_002, 1),
        (i32::MIN, -5, 500_000_000),
    ];

    let mut bytes = Vec::new();
    for &(value, sec, nsec) in &records {
        bytes.extend_from_slice(&encode_record(value, sec, nsec));
    }

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "roundtrip.sdb", &bytes);
    let samples = read_samples(&path).unwrap();

    assert_eq!(samples.len(), records.len());
    for (sample, &(value, sec, nsec)) in samples.iter().zip(&records) {
        assert_eq!(sample.value, i64::from(value));
        assert_eq!(sample.timestamp, sec as f64 + nsec as f64 / 1e9);
    }
}

#[test]
fn test_truncation_tolerance_every_partial_length() {
    let mut bytes = Vec::new();
    for i in 0..4 {
        bytes.extend_from_slice(&encode_record(i, i64::from(i), 0));
    }

    let dir = tempfile::tempdir().unwrap();
    for extra in 1..RECORD_SIZE {
        let mut truncated = bytes.clone();
        truncated.extend(std::iter::repeat(0xEE).take(extra));

        let path = write_file(&dir, &format!("truncated_{extra}.sdb"), &truncated);
        let samples = read_samples(&path).unwrap();

        assert_eq!(samples.len(), 4, "with {extra} trailing bytes");
        assert_eq!(samples[3].value, 3);
    }
}

#[test]
fn test_empty_file_decodes_to_empty_and_averages_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.sdb", &[]);

    let samples = read_samples(&path).unwrap();
    assert!(samples.is_empty());

    let series = binned_rates(&samples, DEFAULT_INTERVAL);
    assert!(series.is_empty());
    assert_eq!(average_rate(&series.points), 0.0);
}

#[test]
fn test_unreadable_source_is_distinct_from_empty() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("never_written.sdb");

    assert!(read_samples(&missing).is_err());

    let empty = write_file(&dir, "present.sdb", &[]);
    assert!(read_samples(&empty).unwrap().is_empty());
}

#[test]
fn test_decode_without_file_matches_file_decode() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&encode_record(9, 42, 0));
    bytes.extend_from_slice(&encode_record(11, 43, 250_000_000));

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "same.sdb", &bytes);

    assert_eq!(read_samples(&path).unwrap(), decode_samples(&bytes));
}
