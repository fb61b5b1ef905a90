//! Configuration types for lqs-tools operations.

use crate::reports::{ReportConfig, ReportFormat};
use crate::text::SimilarityMetric;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Score thresholds and report detail
    pub scoring: ScoringConfig,
    /// Batch scoring over directories
    pub batch: BatchConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Report settings derived from this configuration.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            show_flags: self.scoring.show_flags,
            show_breakdown: self.scoring.show_breakdown,
            ..ReportConfig::default()
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Fail when any document scores below this total.
    pub const fn min_score(mut self, min_score: Option<f64>) -> Self {
        self.config.scoring.min_score = min_score;
        self
    }

    /// List every dimension flag in text reports.
    pub const fn show_flags(mut self, show: bool) -> Self {
        self.config.scoring.show_flags = show;
        self
    }

    /// Select the bullet-similarity metric.
    pub const fn similarity(mut self, metric: SimilarityMetric) -> Self {
        self.config.scoring.similarity = metric;
        self
    }

    /// Score every snapshot instead of only the latest per product.
    pub const fn all_versions(mut self, all: bool) -> Self {
        self.config.batch.latest_only = !all;
        self
    }

    /// Attach aggregate statistics to batch reports.
    pub const fn include_statistics(mut self, include: bool) -> Self {
        self.config.batch.include_statistics = include;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Summary,
            file: None,
            no_color: false,
        }
    }
}

/// Scoring thresholds and report detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Exit with code 1 when any document's total falls below this (0-100)
    pub min_score: Option<f64>,
    /// List every dimension flag
    pub show_flags: bool,
    /// List sub-scores under each dimension
    pub show_breakdown: bool,
    /// Metric used to compare bullets against competitor copy
    pub similarity: SimilarityMetric,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: None,
            show_flags: false,
            show_breakdown: true,
            similarity: SimilarityMetric::Dice,
        }
    }
}

/// Batch scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BatchConfig {
    /// Score only the latest snapshot of each product in a directory
    pub latest_only: bool,
    /// Attach aggregate statistics to batch reports
    pub include_statistics: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            latest_only: true,
            include_statistics: false,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
}
