//! Listing document model.
//!
//! [`PipelineDocument`] mirrors the upstream JSON (both naming schemes) and
//! [`DocumentAccessor`] turns it into the canonical values the scorers use.

mod accessor;
mod document;
mod lenient;

pub use accessor::{
    CompetitorEntry, DocumentAccessor, KeywordEntry, KeywordTier, ThemeEntry, UspEntry,
};
pub use document::{
    Competitor, Content, IntentTheme, Keyword, KeywordCollections, KeywordPackage, KeywordSets,
    ListingCreation, PipelineDocument, QualityReport, ThemeFeature, Usp,
};
