//! Listing Quality Score module.
//!
//! Scores a listing document on six independently weighted dimensions and
//! aggregates them into a total, a letter grade and recommendations.
//!
//! # Dimensions
//!
//! | Dimension | Weight |
//! |---|---|
//! | Keyword optimization | 0.25 |
//! | USP effectiveness | 0.20 |
//! | Readability | 0.15 |
//! | Competitive position | 0.15 |
//! | Customer alignment | 0.15 |
//! | Compliance | 0.10 |
//!
//! Missing optional data never fails scoring: each dimension substitutes a
//! documented neutral default (see the `DEFAULT_*` constants in each
//! dimension module) and usually raises an informational flag.
//!
//! # Usage
//!
//! ```no_run
//! use lqs_tools::model::PipelineDocument;
//! use lqs_tools::quality::LqsScorer;
//!
//! let json = std::fs::read_to_string("B0123ABCDE.json").unwrap();
//! let doc = PipelineDocument::from_json_str(&json).unwrap();
//! let result = LqsScorer::new().score(&doc);
//!
//! println!("LQS: {} ({})", result.total, result.grade.letter());
//! for rec in &result.recommendations {
//!     println!("- {}: {}", rec.dimension, rec.message);
//! }
//! ```

pub mod competitive;
pub mod compliance;
pub mod customer;
mod dimension;
pub mod keyword;
pub mod readability;
mod scorer;
pub mod stats;
pub mod usp;

pub use dimension::{round1, Dimension, DimensionResult, ScoringContext};
pub use scorer::{
    DimensionScores, Grade, LqsResult, LqsScorer, Recommendation, MAX_RECOMMENDATIONS,
    SCORING_ENGINE_VERSION,
};
pub use stats::{
    DimensionAverage, RankedSubScore, StatisticsOverview, SubScoreAverage,
};
