//! Named configuration presets.

use super::types::{AppConfig, BatchConfig, BehaviorConfig, OutputConfig, ScoringConfig};
use crate::error::{LqsError, Result};
use crate::reports::ReportFormat;

/// Minimum total score used by the CI/CD preset.
pub const DEFAULT_CI_MIN_SCORE: f64 = 70.0;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Summary output, latest versions only
    Default,
    /// CI/CD: JSON output, quiet, fail below a minimum score
    CiCd,
    /// Audit: every version, flags and statistics
    Audit,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
            Self::Audit => "audit",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            "audit" | "full" => Some(Self::Audit),
            _ => None,
        }
    }

    /// Parse a preset name, listing the valid names when it is unknown.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| {
            let valid: Vec<&str> = Self::all().iter().map(Self::name).collect();
            LqsError::config(format!(
                "unknown preset '{name}' (valid: {})",
                valid.join(", ")
            ))
        })
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Score cards for the latest snapshot of each product",
            Self::CiCd => "Quiet JSON output that fails below a minimum score",
            Self::Audit => "Every snapshot with flags, breakdowns and batch statistics",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd, Self::Audit]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
            ConfigPreset::Audit => Self::audit_preset(),
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail below [`DEFAULT_CI_MIN_SCORE`]
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            scoring: ScoringConfig {
                min_score: Some(DEFAULT_CI_MIN_SCORE),
                ..ScoringConfig::default()
            },
            batch: BatchConfig::default(),
            behavior: BehaviorConfig { quiet: true },
        }
    }

    /// Audit preset: score every snapshot and show everything.
    #[must_use]
    pub fn audit_preset() -> Self {
        Self {
            output: OutputConfig::default(),
            scoring: ScoringConfig {
                min_score: None,
                show_flags: true,
                show_breakdown: true,
                ..ScoringConfig::default()
            },
            batch: BatchConfig {
                latest_only: false,
                include_statistics: true,
            },
            behavior: BehaviorConfig::default(),
        }
    }
}
