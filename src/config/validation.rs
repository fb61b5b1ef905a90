//! Configuration validation for lqs-tools.

use super::types::{AppConfig, OutputConfig, ScoringConfig};
use crate::error::{LqsError, Result};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fold every validation error into a single [`LqsError::Validation`].
    fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(LqsError::validation(messages.join("; ")))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.scoring.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_score {
            if !(0.0..=100.0).contains(&min) {
                errors.push(ConfigError {
                    field: "scoring.min_score".to_string(),
                    message: format!("Minimum score must be between 0 and 100, got {min}"),
                });
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_min_score_range() {
        let config = AppConfig::builder().min_score(Some(120.0)).build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "scoring.min_score");

        let config = AppConfig::builder().min_score(Some(-1.0)).build();
        assert!(!config.is_valid());
        let config = AppConfig::builder().min_score(Some(100.0)).build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let config = AppConfig::builder()
            .output_file(Some(PathBuf::from("/nonexistent/dir/report.json")))
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.file");

        let bare = AppConfig::builder()
            .output_file(Some(PathBuf::from("report.json")))
            .build();
        assert!(bare.is_valid());
    }

    #[test]
    fn test_ensure_valid_joins_errors() {
        assert!(AppConfig::default().ensure_valid().is_ok());

        let config = AppConfig::builder()
            .min_score(Some(150.0))
            .output_file(Some(PathBuf::from("/nonexistent/dir/report.json")))
            .build();
        let err = config.ensure_valid().unwrap_err();
        assert!(matches!(err, LqsError::Validation(_)));
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: output.file: "));
        assert!(message.contains("; scoring.min_score: "));
    }
}
