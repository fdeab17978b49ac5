//! Rate series derivation from decoded sample sequences
//!
//! Two rate modes are supported: interval binning (sum of values per
//! fixed-width time bin, divided by the bin width) and instantaneous
//! point-to-point rates. A third mode exposes the samples unchanged for
//! occupancy-style traces that are already a time series.
//!
//! All computation is pure and per-stream; combining streams happens in
//! [`crate::sync`].

use crate::decoder::Sample;

/// Default bin width in seconds
pub const DEFAULT_INTERVAL: f64 = 0.1;

/// One point of a derived time series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    /// Unix-epoch seconds
    pub timestamp: f64,
    /// Value-per-second for rate modes, raw sample value for occupancy
    pub rate: f64,
}

/// A binned rate series: one point per fixed-width time bin
///
/// Invariant: point timestamps are strictly increasing and spaced exactly
/// `interval` apart, starting at the first sample's timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub points: Vec<RatePoint>,
    /// Bin width in seconds
    pub interval: f64,
}

impl RateSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Bin samples into fixed `interval`-wide windows and report each window's
/// summed value divided by the window width.
///
/// Bin `i` covers `[t0 + i*interval, t0 + (i+1)*interval)` where `t0` is the
/// first sample's timestamp; the bin count is `floor((t1 - t0) / interval) + 1`
/// with `t1` the last sample's timestamp. Samples whose computed bin index
/// falls outside the bin range are discarded, not an error (edge effects when
/// timestamps are not monotonic).
///
/// Fewer than two samples yield an empty series: a single sample spans no
/// elapsed time, so no throughput is defined. `interval` must be positive.
pub fn binned_rates(samples: &[Sample], interval: f64) -> RateSeries {
    if samples.len() < 2 {
        return RateSeries {
            points: Vec::new(),
            interval,
        };
    }

    let t0 = samples[0].timestamp;
    let t1 = samples[samples.len() - 1].timestamp;
    let bin_count = ((t1 - t0) / interval).floor() as i64 + 1;
    if bin_count <= 0 {
        return RateSeries {
            points: Vec::new(),
            interval,
        };
    }

    let mut bins = vec![0i64; bin_count as usize];
    for sample in samples {
        let index = ((sample.timestamp - t0) / interval).floor() as i64;
        if (0..bin_count).contains(&index) {
            bins[index as usize] += sample.value;
        }
    }

    let points = bins
        .iter()
        .enumerate()
        .map(|(i, &total)| RatePoint {
            timestamp: t0 + i as f64 * interval,
            rate: total as f64 / interval,
        })
        .collect();

    RateSeries { points, interval }
}

/// Point-to-point rates: each adjacent sample pair yields
/// `value[i] / (t[i] - t[i-1])` at timestamp `t[i]`.
///
/// Pairs with non-positive elapsed time are skipped silently; a zero or
/// negative delta carries no rate information.
pub fn instantaneous_rates(samples: &[Sample]) -> Vec<RatePoint> {
    let mut points = Vec::new();

    for pair in samples.windows(2) {
        let elapsed = pair[1].timestamp - pair[0].timestamp;
        if elapsed > 0.0 {
            points.push(RatePoint {
                timestamp: pair[1].timestamp,
                rate: pair[1].value as f64 / elapsed,
            });
        }
    }

    points
}

/// Expose samples unchanged as a time series (occupancy traces).
pub fn raw_points(samples: &[Sample]) -> Vec<RatePoint> {
    samples
        .iter()
        .map(|s| RatePoint {
            timestamp: s.timestamp,
            rate: s.value as f64,
        })
        .collect()
}
