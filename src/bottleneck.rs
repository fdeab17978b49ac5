//! Bottleneck envelope and aggregate statistics
//!
//! End-to-end throughput of a pipeline is bounded by its slowest
//! concurrently-measured stage: at every shared-grid instant the overall
//! series takes the minimum of all interpolated per-stream values. Scalar
//! averages are plain arithmetic means.

use crate::sync::SyncedSeries;
use crate::throughput::RatePoint;

/// Label used for the cross-stream minimum series in reports
pub const OVERALL_LABEL: &str = "overall";

/// Scalar average for one labeled series
#[derive(Debug, Clone, PartialEq)]
pub struct AverageStat {
    pub label: String,
    pub average: f64,
}

/// Minimum-envelope series over every synchronized stream.
///
/// `synced` must carry at least one stream, which [`crate::sync::synchronize`]
/// guarantees.
pub fn overall_minimum(synced: &SyncedSeries) -> Vec<RatePoint> {
    synced
        .grid
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| {
            let rate = synced
                .values
                .values()
                .map(|values| values[i])
                .fold(f64::INFINITY, f64::min);
            RatePoint { timestamp, rate }
        })
        .collect()
}

/// Arithmetic mean of a series' values; an empty series averages to `0.0`
/// rather than failing (no data is a defined degenerate case).
pub fn average_rate(points: &[RatePoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points.iter().map(|p| p.rate).sum();
    total / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn point(timestamp: f64, rate: f64) -> RatePoint {
        RatePoint { timestamp, rate }
    }

    fn synced(grid: Vec<f64>, entries: &[(&str, Vec<f64>)]) -> SyncedSeries {
        let values: BTreeMap<String, Vec<f64>> = entries
            .iter()
            .map(|(label, v)| ((*label).to_string(), v.clone()))
            .collect();
        SyncedSeries { grid, values }
    }

    #[test]
    fn test_overall_minimum_picks_slowest_stream() {
        let synced = synced(
            vec![0.0, 1.0, 2.0],
            &[
                ("input", vec![100.0, 200.0, 300.0]),
                ("output", vec![150.0, 50.0, 400.0]),
            ],
        );
        let overall = overall_minimum(&synced);

        let rates: Vec<f64> = overall.iter().map(|p| p.rate).collect();
        assert_eq!(rates, vec![100.0, 50.0, 300.0]);
        let timestamps: Vec<f64> = overall.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_overall_minimum_never_exceeds_any_stream() {
        let synced = synced(
            vec![0.0, 0.5, 1.0, 1.5],
            &[
                ("a", vec![3.0, 2.0, 9.0, 4.0]),
                ("b", vec![5.0, 1.0, 8.0, 4.0]),
                ("c", vec![4.0, 6.0, 7.0, 5.0]),
            ],
        );
        let overall = overall_minimum(&synced);

        for (i, p) in overall.iter().enumerate() {
            for values in synced.values.values() {
                assert!(p.rate <= values[i]);
            }
        }
    }

    #[test]
    fn test_overall_minimum_single_stream_is_identity() {
        let synced = synced(vec![0.0, 1.0], &[("only", vec![12.0, 34.0])]);
        let overall = overall_minimum(&synced);

        assert_eq!(overall, vec![point(0.0, 12.0), point(1.0, 34.0)]);
    }

    #[test]
    fn test_average_rate_empty_is_zero() {
        assert_eq!(average_rate(&[]), 0.0);
    }

    #[test]
    fn test_average_rate_mean() {
        let points = [point(0.0, 10.0), point(1.0, 20.0), point(2.0, 60.0)];
        assert_eq!(average_rate(&points), 30.0);
    }

    #[test]
    fn test_average_rate_single_point() {
        assert_eq!(average_rate(&[point(5.0, 42.5)]), 42.5);
    }
}
