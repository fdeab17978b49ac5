//! Multi-stream timestamp synchronization
//!
//! Independently binned streams carry independent timestamp grids. To compare
//! them instant-by-instant, the synchronizer builds the sorted, de-duplicated
//! union of every timestamp across all streams and maps each stream onto that
//! shared grid with linear interpolation. Grid instants outside a stream's
//! own range clamp to its first or last value (flat extrapolation) instead of
//! being treated as missing or zero.

use crate::throughput::RatePoint;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors for stream synchronization
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("no usable series to synchronize")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Per-label values interpolated onto a shared timestamp grid
///
/// `values[label]` has one entry per `grid` timestamp. Built and owned by one
/// [`synchronize`] call; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedSeries {
    /// Sorted, de-duplicated union of all input timestamps
    pub grid: Vec<f64>,
    pub values: BTreeMap<String, Vec<f64>>,
}

impl SyncedSeries {
    /// Labels in deterministic (sorted) order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Synchronize every labeled series onto a shared timestamp grid.
///
/// A series without points cannot contribute values at any instant and is
/// excluded with a warning. Fails fast with [`SyncError::EmptyInput`] when no
/// usable series remains; there is no meaningful shared grid for zero streams.
pub fn synchronize(series: &BTreeMap<String, Vec<RatePoint>>) -> Result<SyncedSeries> {
    let mut usable: BTreeMap<&str, &[RatePoint]> = BTreeMap::new();
    for (label, points) in series {
        if points.is_empty() {
            tracing::warn!(label = %label, "excluding empty series from synchronization");
        } else {
            usable.insert(label, points);
        }
    }

    if usable.is_empty() {
        return Err(SyncError::EmptyInput);
    }

    let mut grid: Vec<f64> = usable
        .values()
        .flat_map(|points| points.iter().map(|p| p.timestamp))
        .collect();
    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let values = usable
        .iter()
        .map(|(label, points)| {
            let interpolated = grid.iter().map(|&t| interpolate_at(points, t)).collect();
            ((*label).to_string(), interpolated)
        })
        .collect();

    Ok(SyncedSeries { grid, values })
}

/// Linearly interpolate a series at time `t`.
///
/// Exact pass-through: `t` equal to one of the series' own timestamps returns
/// that point's value unchanged. Outside the series' range the boundary value
/// is returned (flat extrapolation). `points` must be non-empty and sorted by
/// timestamp.
pub fn interpolate_at(points: &[RatePoint], t: f64) -> f64 {
    let first = points[0];
    let last = points[points.len() - 1];

    if t <= first.timestamp {
        return first.rate;
    }
    if t >= last.timestamp {
        return last.rate;
    }

    // First point at or after t; bounds are safe after the clamp checks.
    let upper = points.partition_point(|p| p.timestamp < t);
    let hi = points[upper];
    if hi.timestamp == t {
        return hi.rate;
    }
    let lo = points[upper - 1];

    let weight = (t - lo.timestamp) / (hi.timestamp - lo.timestamp);
    lo.rate + weight * (hi.rate - lo.rate)
}
