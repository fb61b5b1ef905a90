//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Per-document score card
    #[default]
    Summary,
    /// One aligned row per document
    Table,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// List every dimension flag
    pub show_flags: bool,
    /// List sub-scores under each dimension
    pub show_breakdown: bool,
    /// Maximum entries listed in text formats
    pub max_items: Option<usize>,
    /// Title for the report
    pub title: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_flags: false,
            show_breakdown: true,
            max_items: None,
            title: None,
        }
    }
}
