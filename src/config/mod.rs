//! Configuration module for lqs-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lqs_tools::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::CiCd);
//!
//! let config = AppConfig::builder()
//!     .min_score(Some(75.0))
//!     .all_versions(true)
//!     .build();
//!
//! use lqs_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.lqs-tools.yaml` file in your project root or `~/.config/lqs-tools/`:
//!
//! ```yaml
//! scoring:
//!   min_score: 70
//! batch:
//!   include_statistics: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_CI_MIN_SCORE};
pub use types::{
    AppConfig, AppConfigBuilder, BatchConfig, BehaviorConfig, OutputConfig, ScoringConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.lqs-tools.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
