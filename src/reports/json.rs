//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::BatchReport;
use crate::quality::{LqsResult, StatisticsOverview};
use crate::versions::{VersionIndex, VersionedFile};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_score_report(
        &self,
        result: &LqsResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(result)
    }

    fn generate_batch_report(
        &self,
        report: &BatchReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(report)
    }

    fn generate_versions_report(
        &self,
        index: &VersionIndex,
        latest_only: bool,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        if latest_only {
            let latest: Vec<&VersionedFile> =
                index.iter().filter_map(|(_, h)| h.last()).collect();
            self.render(&latest)
        } else {
            self.render(index)
        }
    }

    fn generate_stats_report(
        &self,
        overview: &StatisticsOverview,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(overview)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
