//! CSV output format for analysis reports
//!
//! One row per series point: `series,timestamp,value`. Every analyzed stream
//! is emitted, then the overall bottleneck series when present.

use crate::engine::AnalysisReport;
use crate::throughput::RatePoint;

/// CSV report formatter
#[derive(Debug)]
pub struct CsvReport<'a> {
    report: &'a AnalysisReport,
}

impl<'a> CsvReport<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_series(out: &mut String, label: &str, points: &[RatePoint]) {
        let label = Self::escape_field(label);
        for point in points {
            out.push_str(&format!("{},{},{}\n", label, point.timestamp, point.rate));
        }
    }

    /// Render the full report as CSV with a header row
    pub fn render(&self) -> String {
        let mut out = String::from("series,timestamp,value\n");

        for stream in &self.report.streams {
            Self::push_series(&mut out, &stream.label, &stream.points);
        }
        if let Some(overall) = &self.report.overall {
            Self::push_series(&mut out, crate::bottleneck::OVERALL_LABEL, &overall.points);
        }

        out
    }
}
