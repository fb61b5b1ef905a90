//! Quality dimensions, per-dimension results and the shared scoring context.

use crate::model::DocumentAccessor;
use crate::text::{StringSimilarity, SyllableCounter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six independently weighted quality axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    KeywordOptimization,
    UspEffectiveness,
    Readability,
    CompetitivePosition,
    CustomerAlignment,
    Compliance,
}

impl Dimension {
    /// All dimensions in reporting and recommendation order.
    pub const ALL: [Self; 6] = [
        Self::KeywordOptimization,
        Self::UspEffectiveness,
        Self::Readability,
        Self::CompetitivePosition,
        Self::CustomerAlignment,
        Self::Compliance,
    ];

    /// Fixed weight of this dimension. The six weights sum to 1.0.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::KeywordOptimization => 0.25,
            Self::UspEffectiveness => 0.20,
            Self::Readability | Self::CompetitivePosition | Self::CustomerAlignment => 0.15,
            Self::Compliance => 0.10,
        }
    }

    /// Machine name used as the result key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::KeywordOptimization => "keyword_optimization",
            Self::UspEffectiveness => "usp_effectiveness",
            Self::Readability => "readability",
            Self::CompetitivePosition => "competitive_position",
            Self::CustomerAlignment => "customer_alignment",
            Self::Compliance => "compliance",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::KeywordOptimization => "Keyword Optimization",
            Self::UspEffectiveness => "USP Effectiveness",
            Self::Readability => "Readability",
            Self::CompetitivePosition => "Competitive Position",
            Self::CustomerAlignment => "Customer Alignment",
            Self::Compliance => "Compliance",
        }
    }

    /// Parse a machine name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of scoring one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    /// Integer score 0-100
    pub score: u32,
    pub weight: f64,
    /// `score × weight`, rounded to one decimal
    pub weighted: f64,
    /// Named sub-scores, in computation order
    pub breakdown: IndexMap<String, u32>,
    /// Diagnostic messages
    pub flags: Vec<String>,
}

impl DimensionResult {
    /// Build a result from an unrounded score.
    ///
    /// The score is rounded and clamped to 0-100; sub-scores likewise.
    #[must_use]
    pub fn new<'a>(
        dimension: Dimension,
        raw_score: f64,
        breakdown: impl IntoIterator<Item = (&'a str, f64)>,
        flags: Vec<String>,
    ) -> Self {
        let score = to_score(raw_score);
        let weight = dimension.weight();
        Self {
            score,
            weight,
            weighted: round1(f64::from(score) * weight),
            breakdown: breakdown
                .into_iter()
                .map(|(name, value)| (name.to_string(), to_score(value)))
                .collect(),
            flags,
        }
    }

    /// A fixed neutral result used when the dimension has no input data.
    #[must_use]
    pub fn neutral(dimension: Dimension, score: f64, sub_scores: &[&str], flag: &str) -> Self {
        Self::new(
            dimension,
            score,
            sub_scores.iter().map(|name| (*name, score)),
            vec![flag.to_string()],
        )
    }

    /// Named sub-score, if present.
    #[must_use]
    pub fn sub_score(&self, name: &str) -> Option<u32> {
        self.breakdown.get(name).copied()
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest integer and clamp to 0-100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Lower-cased views of the listing copy plus the text metrics, built once
/// per document and shared by every dimension scorer.
pub struct ScoringContext<'a> {
    pub doc: DocumentAccessor<'a>,
    pub title: &'a str,
    pub bullets: &'a [String],
    pub title_lower: String,
    pub bullets_lower: Vec<String>,
    pub description_lower: String,
    pub similarity: &'a dyn StringSimilarity,
    pub syllables: &'a dyn SyllableCounter,
}

impl<'a> ScoringContext<'a> {
    #[must_use]
    pub fn new(
        doc: DocumentAccessor<'a>,
        similarity: &'a dyn StringSimilarity,
        syllables: &'a dyn SyllableCounter,
    ) -> Self {
        Self {
            title: doc.title(),
            bullets: doc.bullets(),
            title_lower: doc.title().to_lowercase(),
            bullets_lower: doc.bullets().iter().map(|b| b.to_lowercase()).collect(),
            description_lower: doc.description().to_lowercase(),
            doc,
            similarity,
            syllables,
        }
    }

    /// Title and bullets joined with spaces, original case.
    #[must_use]
    pub fn title_and_bullets(&self) -> String {
        std::iter::once(self.title)
            .chain(self.bullets.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Title, bullets and description joined with spaces, lower-cased.
    #[must_use]
    pub fn full_text_lower(&self) -> String {
        std::iter::once(self.title_lower.as_str())
            .chain(self.bullets_lower.iter().map(String::as_str))
            .chain(std::iter::once(self.description_lower.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Average per-bullet credit against competitor bullets, scaled to 100.
    ///
    /// Each own bullet earns `credit(max similarity)`; empty own bullets earn
    /// nothing but still count. Returns `None` when there is nothing to compare.
    pub fn bullet_similarity_score(
        &self,
        competitor_bullets: &[String],
        credit: impl Fn(f64) -> f64,
    ) -> Option<f64> {
        if competitor_bullets.is_empty() || self.bullets_lower.is_empty() {
            return None;
        }
        let competitor_lower: Vec<String> =
            competitor_bullets.iter().map(|b| b.to_lowercase()).collect();
        let total: f64 = self
            .bullets_lower
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| credit(self.similarity.max_similarity(b, &competitor_lower)))
            .sum();
        Some(total / self.bullets_lower.len() as f64 * 100.0)
    }
}
