//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod score;
mod stats;
mod versions;

pub use score::{collect_sources, run_score};
pub use stats::{parse_saved_results, run_stats};
pub use versions::run_versions;

// Re-export config types used by handlers
pub use crate::config::AppConfig;
