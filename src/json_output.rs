//! JSON output format for analysis reports
//!
//! The JSON shape mirrors what the plotting frontend consumes: every series
//! is an ordered list of `(timestamp, value)` pairs, with unix-epoch-second
//! timestamps, plus scalar averages per series.

use crate::engine::{AnalysisReport, OverallReport, StreamReport};
use crate::throughput::RatePoint;
use serde::{Deserialize, Serialize};

/// One `(timestamp, value)` point of an exported series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPoint {
    /// Unix-epoch seconds
    pub timestamp: f64,
    pub value: f64,
}

/// An exported stream series with its scalar average
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSeries {
    pub label: String,
    pub points: Vec<JsonPoint>,
    pub average: f64,
}

/// A stream that was skipped, with its cause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSkipped {
    pub label: String,
    pub reason: String,
}

/// Top-level JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub streams: Vec<JsonSeries>,
    /// Cross-stream bottleneck series, absent when not computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<JsonSeries>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<JsonSkipped>,
}

fn json_points(points: &[RatePoint]) -> Vec<JsonPoint> {
    points
        .iter()
        .map(|p| JsonPoint {
            timestamp: p.timestamp,
            value: p.rate,
        })
        .collect()
}

fn json_series(stream: &StreamReport) -> JsonSeries {
    JsonSeries {
        label: stream.label.clone(),
        points: json_points(&stream.points),
        average: stream.average,
    }
}

fn json_overall(overall: &OverallReport) -> JsonSeries {
    JsonSeries {
        label: crate::bottleneck::OVERALL_LABEL.to_string(),
        points: json_points(&overall.points),
        average: overall.average,
    }
}

impl JsonReport {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            streams: report.streams.iter().map(json_series).collect(),
            overall: report.overall.as_ref().map(json_overall),
            skipped: report
                .skipped
                .iter()
                .map(|s| JsonSkipped {
                    label: s.label.clone(),
                    reason: s.reason.to_string(),
                })
                .collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
