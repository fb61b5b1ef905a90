//! String similarity algorithms for bullet-level comparison.

use super::traits::StringSimilarity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configurable choice of bullet-similarity metric.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// [`DiceSimilarity`]
    #[default]
    Dice,
    /// [`LevenshteinSimilarity`]
    Levenshtein,
}

impl SimilarityMetric {
    /// Instantiate the metric.
    #[must_use]
    pub fn boxed(self) -> Box<dyn StringSimilarity> {
        match self {
            Self::Dice => Box::new(DiceSimilarity),
            Self::Levenshtein => Box::new(LevenshteinSimilarity),
        }
    }
}

/// Sørensen–Dice coefficient over character bigrams.
///
/// Whitespace is ignored, identical strings score `1.0`, and strings shorter
/// than two characters can only match by being identical. Callers lower-case
/// both sides before comparing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceSimilarity;

impl StringSimilarity for DiceSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::sorensen_dice(a, b)
    }

    fn name(&self) -> &'static str {
        "sorensen-dice"
    }
}

/// Normalized Levenshtein similarity.
///
/// Stricter than Dice for reordered phrasing; useful when bullet copy is
/// expected to be rewritten rather than shuffled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinSimilarity;

impl StringSimilarity for LevenshteinSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "normalized-levenshtein"
    }
}
