//! I/O shell around the scoring core.
//!
//! Discovers listing documents on disk, narrows them to the latest version of
//! each product, scores them in parallel and writes rendered output. Nothing
//! in here affects how a single document is scored.

mod batch;
mod discover;
mod load;
mod output;

pub use batch::{
    score_batch, BatchFailure, BatchMeta, BatchReport, ContentSummary, ScoreEntry, SourceFile,
};
pub use discover::{describe_file, discover_files};
pub use load::load_document;
pub use output::{should_use_color, write_output, OutputTarget};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No input path produced a document to score
    #[error("No listing documents found in {paths}")]
    NothingToScore { paths: String },

    /// Every queued document failed to load
    #[error("All {count} document(s) failed to load")]
    AllFailed { count: usize },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// At least one document scored below the configured minimum
    pub const BELOW_MIN_SCORE: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::BELOW_MIN_SCORE, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_messages() {
        let err = PipelineError::AllFailed { count: 2 };
        assert_eq!(err.to_string(), "All 2 document(s) failed to load");
    }
}
