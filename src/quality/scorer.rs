//! Listing Quality Scorer.
//!
//! Runs the six dimension scorers over one document and aggregates them into
//! a total score, a letter grade and a capped recommendation list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dimension::{round1, Dimension, DimensionResult, ScoringContext};
use super::{competitive, compliance, customer, keyword, readability, usp};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::model::{DocumentAccessor, PipelineDocument};
use crate::text::{
    DiceSimilarity, HeuristicSyllableCounter, SimilarityMetric, StringSimilarity, SyllableCounter,
};

/// Scoring engine version
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Maximum number of recommendations per result
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Letter grade derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Excellent: 90-100
    A,
    /// Good: 80-89
    B,
    /// Fair: 70-79
    C,
    /// Poor: 60-69
    D,
    /// Failing: <60
    F,
}

impl Grade {
    /// Create grade from a total score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Get grade letter
    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Get grade description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Good",
            Self::C => "Fair",
            Self::D => "Poor",
            Self::F => "Failing",
        }
    }
}

/// Recommendation for improving a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Dimension the recommendation addresses
    pub dimension: Dimension,
    /// Human-readable message
    pub message: String,
}

impl Recommendation {
    fn new(dimension: Dimension, message: impl Into<String>) -> Self {
        Self {
            dimension,
            message: message.into(),
        }
    }
}

/// The six dimension results, keyed by dimension name when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub keyword_optimization: DimensionResult,
    pub usp_effectiveness: DimensionResult,
    pub readability: DimensionResult,
    pub competitive_position: DimensionResult,
    pub customer_alignment: DimensionResult,
    pub compliance: DimensionResult,
}

impl DimensionScores {
    /// Result for one dimension
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &DimensionResult {
        match dimension {
            Dimension::KeywordOptimization => &self.keyword_optimization,
            Dimension::UspEffectiveness => &self.usp_effectiveness,
            Dimension::Readability => &self.readability,
            Dimension::CompetitivePosition => &self.competitive_position,
            Dimension::CustomerAlignment => &self.customer_alignment,
            Dimension::Compliance => &self.compliance,
        }
    }

    /// Results in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &DimensionResult)> {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Sum of weighted contributions, rounded to one decimal
    #[must_use]
    pub fn total(&self) -> f64 {
        round1(self.iter().map(|(_, r)| r.weighted).sum())
    }
}

/// Listing Quality Score for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LqsResult {
    /// Weighted total, 0-100, one decimal
    #[serde(rename = "lqs_total")]
    pub total: f64,
    pub grade: Grade,
    pub dimensions: DimensionScores,
    /// At most [`MAX_RECOMMENDATIONS`] entries, in dimension order
    pub recommendations: Vec<Recommendation>,
    pub calculated_at: DateTime<Utc>,
    /// Product identifier copied from the document
    #[serde(rename = "asin")]
    pub product_id: String,
}

impl LqsResult {
    /// All dimension flags in dimension order
    pub fn flags(&self) -> impl Iterator<Item = (Dimension, &str)> {
        self.dimensions
            .iter()
            .flat_map(|(d, r)| r.flags.iter().map(move |f| (d, f.as_str())))
    }
}

/// Listing quality scoring engine
pub struct LqsScorer {
    similarity: Box<dyn StringSimilarity>,
    syllables: Box<dyn SyllableCounter>,
}

impl LqsScorer {
    /// Create a scorer with the default text metrics
    #[must_use]
    pub fn new() -> Self {
        Self {
            similarity: Box::new(DiceSimilarity),
            syllables: Box::new(HeuristicSyllableCounter),
        }
    }

    /// Create a scorer with the metrics selected in `config`
    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new().with_similarity_metric(config.similarity)
    }

    /// Use a configured bullet-similarity metric
    #[must_use]
    pub fn with_similarity_metric(mut self, metric: SimilarityMetric) -> Self {
        self.similarity = metric.boxed();
        self
    }

    /// Use a different bullet-similarity metric
    #[must_use]
    pub fn with_similarity(mut self, similarity: impl StringSimilarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    /// Use a different syllable counter
    #[must_use]
    pub fn with_syllable_counter(mut self, counter: impl SyllableCounter + 'static) -> Self {
        self.syllables = Box::new(counter);
        self
    }

    /// Score a decoded document. Never fails.
    #[must_use]
    pub fn score(&self, doc: &PipelineDocument) -> LqsResult {
        let ctx = ScoringContext::new(
            DocumentAccessor::new(doc),
            self.similarity.as_ref(),
            self.syllables.as_ref(),
        );

        let dimensions = DimensionScores {
            keyword_optimization: keyword::score(&ctx),
            usp_effectiveness: usp::score(&ctx),
            readability: readability::score(&ctx),
            competitive_position: competitive::score(&ctx),
            customer_alignment: customer::score(&ctx),
            compliance: compliance::score(&ctx),
        };

        for (dimension, result) in dimensions.iter() {
            tracing::debug!(
                product = %doc.asin,
                dimension = dimension.name(),
                score = result.score,
                flags = result.flags.len(),
                "Scored dimension"
            );
        }

        let total = dimensions.total();
        let recommendations = generate_recommendations(&dimensions);

        LqsResult {
            total,
            grade: Grade::from_score(total),
            dimensions,
            recommendations,
            calculated_at: Utc::now(),
            product_id: doc.asin.clone(),
        }
    }

    /// Decode and score a JSON document.
    pub fn score_json(&self, json: &str) -> Result<LqsResult> {
        let doc = PipelineDocument::from_json_str(json)?;
        Ok(self.score(&doc))
    }
}

impl Default for LqsScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LqsScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LqsScorer")
            .field("similarity", &self.similarity.name())
            .field("syllables", &self.syllables.name())
            .finish()
    }
}

// Recommendation thresholds
const KEYWORD_REVIEW_BELOW: u32 = 80;
const TITLE_PLACEMENT_BELOW: u32 = 80;
const TIER_ALIGNMENT_BELOW: u32 = 80;
const USP_REVIEW_BELOW: u32 = 80;
const DIFFERENTIATION_BELOW: u32 = 70;
const PROOF_STRENGTH_BELOW: u32 = 70;
const READABILITY_REVIEW_BELOW: u32 = 80;
const FLESCH_BELOW: u32 = 70;
const SCANNABILITY_BELOW: u32 = 70;
const COMPETITIVE_BELOW: u32 = 70;
const CUSTOMER_BELOW: u32 = 70;
const COMPLIANCE_BELOW: u32 = 90;

/// Derive recommendations from scores and breakdowns, in dimension order.
fn generate_recommendations(dims: &DimensionScores) -> Vec<Recommendation> {
    let below = |r: &DimensionResult, name: &str, limit: u32| {
        r.sub_score(name).is_some_and(|v| v < limit)
    };
    let mut recs = Vec::new();

    let kw = &dims.keyword_optimization;
    if kw.score < KEYWORD_REVIEW_BELOW {
        if below(kw, "title_placement", TITLE_PLACEMENT_BELOW) {
            recs.push(Recommendation::new(
                Dimension::KeywordOptimization,
                "Add more primary keywords to the title for better search visibility",
            ));
        }
        if below(kw, "tier_alignment", TIER_ALIGNMENT_BELOW) {
            recs.push(Recommendation::new(
                Dimension::KeywordOptimization,
                "Ensure primary keywords appear in title/top bullets, not just description",
            ));
        }
    }

    let usp = &dims.usp_effectiveness;
    if usp.score < USP_REVIEW_BELOW {
        if below(usp, "differentiation", DIFFERENTIATION_BELOW) {
            recs.push(Recommendation::new(
                Dimension::UspEffectiveness,
                "Rephrase USPs to differentiate from competitor messaging",
            ));
        }
        if below(usp, "proof_strength", PROOF_STRENGTH_BELOW) {
            recs.push(Recommendation::new(
                Dimension::UspEffectiveness,
                "Add specific numbers, measurements, or proof points to strengthen claims",
            ));
        }
    }

    let read = &dims.readability;
    if read.score < READABILITY_REVIEW_BELOW {
        if below(read, "flesch_score", FLESCH_BELOW) {
            recs.push(Recommendation::new(
                Dimension::Readability,
                "Simplify language - use shorter sentences and common words",
            ));
        }
        if below(read, "scannability", SCANNABILITY_BELOW) {
            recs.push(Recommendation::new(
                Dimension::Readability,
                "Start bullets with capitalized feature names for better scannability",
            ));
        }
    }

    if dims.competitive_position.score < COMPETITIVE_BELOW {
        recs.push(Recommendation::new(
            Dimension::CompetitivePosition,
            "Find unique angles that competitors are not using",
        ));
    }

    if dims.customer_alignment.score < CUSTOMER_BELOW {
        recs.push(Recommendation::new(
            Dimension::CustomerAlignment,
            "Address more customer pain points directly in bullet copy",
        ));
    }

    if dims.compliance.score < COMPLIANCE_BELOW {
        recs.extend(dims.compliance.flags.iter().map(|flag| {
            Recommendation::new(
                Dimension::Compliance,
                format!("Fix compliance issue: {flag}"),
            )
        }));
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NO_BREAKDOWN: [(&str, f64); 0] = [];

    fn neutral(dimension: Dimension, score: f64) -> DimensionResult {
        DimensionResult::new(dimension, score, NO_BREAKDOWN, vec![])
    }

    fn all_at(score: f64) -> DimensionScores {
        DimensionScores {
            keyword_optimization: neutral(Dimension::KeywordOptimization, score),
            usp_effectiveness: neutral(Dimension::UspEffectiveness, score),
            readability: neutral(Dimension::Readability, score),
            competitive_position: neutral(Dimension::CompetitivePosition, score),
            customer_alignment: neutral(Dimension::CustomerAlignment, score),
            compliance: neutral(Dimension::Compliance, score),
        }
    }

    #[test]
    fn test_grade_from_score() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.9), Grade::B);
        assert_eq!(Grade::from_score(80.0), Grade::B);
        assert_eq!(Grade::from_score(79.9), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn test_grade_labels() {
        assert_eq!(Grade::B.letter(), "B");
        assert_eq!(Grade::F.description(), "Failing");
    }

    #[test]
    fn test_total_is_rounded_sum() {
        let dims = all_at(100.0);
        assert_eq!(dims.total(), 100.0);
        let dims = all_at(0.0);
        assert_eq!(dims.total(), 0.0);
    }

    #[test]
    fn test_recommendations_capped_and_ordered() {
        let mut dims = all_at(10.0);
        dims.compliance = DimensionResult::new(
            Dimension::Compliance,
            10.0,
            [],
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        // sub-scores are absent, so only the score-only rules and compliance fire
        let recs = generate_recommendations(&dims);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recs[0].dimension, Dimension::CompetitivePosition);
        assert_eq!(recs[1].dimension, Dimension::CustomerAlignment);
        assert_eq!(recs[2].message, "Fix compliance issue: a");
        assert_eq!(recs[4].message, "Fix compliance issue: c");
    }

    #[test]
    fn test_no_recommendations_when_strong() {
        assert!(generate_recommendations(&all_at(95.0)).is_empty());
    }

    #[test]
    fn test_score_minimal_document() {
        let result = LqsScorer::new()
            .score_json(r#"{"ASIN": "B0123ABCDE", "Content": {"title": "Widget", "bullet_points": []}}"#)
            .unwrap();
        assert_eq!(result.product_id, "B0123ABCDE");
        assert!((0.0..=100.0).contains(&result.total));
        assert_eq!(result.total, result.dimensions.total());
        assert_eq!(result.grade, Grade::from_score(result.total));
        assert!(result.recommendations.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_score_json_rejects_bad_shape() {
        assert!(LqsScorer::new()
            .score_json(r#"{"Content": {"title": "x"}}"#)
            .is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let doc = PipelineDocument::new("B0123ABCDE", "Widget", vec!["One".to_string()]);
        let value = serde_json::to_value(LqsScorer::default().score(&doc)).unwrap();
        assert!(value["lqs_total"].is_number());
        assert_eq!(value["asin"], json!("B0123ABCDE"));
        assert!(value["dimensions"]["keyword_optimization"]["breakdown"]["coverage"].is_number());
        assert_eq!(value["dimensions"]["compliance"]["weight"], json!(0.1));
    }

    #[test]
    fn test_custom_metrics() {
        let scorer = LqsScorer::new()
            .with_similarity(crate::text::LevenshteinSimilarity)
            .with_syllable_counter(HeuristicSyllableCounter);
        let debug = format!("{scorer:?}");
        assert!(debug.contains("normalized-levenshtein"));
        assert!(debug.contains("vowel-group-heuristic"));
    }

    #[test]
    fn test_scorer_from_config() {
        let config = ScoringConfig {
            similarity: SimilarityMetric::Levenshtein,
            ..ScoringConfig::default()
        };
        let debug = format!("{:?}", LqsScorer::from_config(&config));
        assert!(debug.contains("normalized-levenshtein"));

        let debug = format!("{:?}", LqsScorer::from_config(&ScoringConfig::default()));
        assert!(debug.contains("sorensen-dice"));
    }
}
