//! **Listing Quality Score engine for generated product listings.**
//!
//! `lqs-tools` scores a product listing document produced by a content
//! generation pipeline and returns a 0–100 Listing Quality Score (LQS) with a
//! letter grade, a per-dimension breakdown, and prioritized recommendations.
//! It also resolves dated listing snapshots to a version history so that only
//! the latest snapshot of each product needs scoring.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`PipelineDocument`] mirrors the upstream JSON document in
//!   both the current and the legacy field naming. [`DocumentAccessor`]
//!   resolves either scheme to canonical values.
//! - **[`quality`]**: The six dimension scorers and [`LqsScorer`], which
//!   aggregates them into an [`LqsResult`]. Scoring is pure and deterministic.
//! - **[`text`]**: String similarity, syllable counting, and word helpers the
//!   scorers share.
//! - **[`versions`]**: Product id and date extraction from snapshot file names
//!   plus [`group_versions`] / [`resolve_latest`].
//! - **[`pipeline`]**: File discovery, parallel batch scoring, and output.
//! - **[`reports`]**: Summary, table, and JSON renderers.
//! - **[`config`]**: YAML configuration with presets and discovery.
//!
//! ## Getting Started: Scoring a Document
//!
//! ```no_run
//! use lqs_tools::{score, PipelineDocument};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raw = std::fs::read_to_string("B0123ABCDE_2024-03-10.json")?;
//!     let doc = PipelineDocument::from_json_str(&raw)?;
//!     let result = score(&doc);
//!
//!     println!("LQS {:.1} ({})", result.total, result.grade.letter());
//!     for rec in &result.recommendations {
//!         println!("  [{}] {}", rec.dimension.name(), rec.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Picking the latest snapshot of each product
//!
//! ```no_run
//! use lqs_tools::{pipeline::discover_files, resolve_latest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = discover_files(std::path::Path::new("snapshots"))?;
//!     for file in resolve_latest(&files) {
//!         println!("{} -> {}", file.product_id, file.key);
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores are bounded 0..=100 and counts are small, so usize/f64 casts are safe
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod quality;
pub mod reports;
pub mod text;
pub mod versions;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BatchConfig, BehaviorConfig, OutputConfig, ScoringConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, LqsError, Result};
pub use model::{DocumentAccessor, PipelineDocument};
pub use pipeline::{score_batch, BatchReport, ScoreEntry, SourceFile};
pub use quality::{
    Dimension, DimensionResult, DimensionScores, Grade, LqsResult, LqsScorer, Recommendation,
    StatisticsOverview,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use versions::{
    extract_date_from_filename, extract_product_id, group_versions, resolve_latest,
    FileDescriptor, VersionIndex, VersionedFile,
};

/// Score a document with the default scorer.
#[must_use]
pub fn score(doc: &PipelineDocument) -> LqsResult {
    LqsScorer::new().score(doc)
}
