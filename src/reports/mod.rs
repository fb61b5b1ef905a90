//! Report generation for scores, batches, version histories and statistics.
//!
//! Three output formats are available:
//! - Summary: per-document score cards for the terminal
//! - Table: one aligned row per document
//! - JSON: structured data for programmatic integration

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat};

use crate::pipeline::BatchReport;
use crate::quality::{LqsResult, StatisticsOverview};
use crate::versions::VersionIndex;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Report for a single scored document
    fn generate_score_report(
        &self,
        result: &LqsResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report for a scored batch
    fn generate_batch_report(
        &self,
        report: &BatchReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report listing version histories, or only the latest version of each product
    fn generate_versions_report(
        &self,
        index: &VersionIndex,
        latest_only: bool,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report for aggregate statistics
    fn generate_stats_report(
        &self,
        overview: &StatisticsOverview,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a batch report to a writer
    fn write_batch_report(
        &self,
        report: &BatchReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let text = self.generate_batch_report(report, config)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_formats() {
        for format in [ReportFormat::Summary, ReportFormat::Table, ReportFormat::Json] {
            assert_eq!(create_reporter_with_options(format, false).format(), format);
        }
    }

    #[test]
    fn test_write_batch_report_to_writer() {
        let report = crate::pipeline::score_batch(&crate::quality::LqsScorer::new(), &[]);
        let mut buf = Vec::new();
        create_reporter(ReportFormat::Json)
            .write_batch_report(&report, &ReportConfig::default(), &mut buf)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["meta"]["totalFiles"], 0);
        assert!(value["entries"].as_array().unwrap().is_empty());
    }
}
