//! Competitive Position dimension.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::model::{CompetitorEntry, KeywordTier};
use crate::text::count_whole_word;

/// Score reported when there is no competitor data at all.
pub const NO_COMPETITORS_SCORE: f64 = 70.0;
/// Keyword differentiation reported when the listing has no keywords.
pub const DEFAULT_KEYWORD_DIFFERENTIATION: f64 = 70.0;
/// Value-proposition uniqueness reported when nothing can be compared.
pub const DEFAULT_VALUE_PROP_UNIQUENESS: f64 = 75.0;

const OVERLAP_FLAG_THRESHOLD: f64 = 50.0;

fn keyword_differentiation(keywords: &[String], competitors: &[CompetitorEntry]) -> f64 {
    if keywords.is_empty() {
        return DEFAULT_KEYWORD_DIFFERENTIATION;
    }
    let competitor_text = competitors
        .iter()
        .map(|c| {
            std::iter::once(c.title.as_str())
                .chain(c.bullets.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join(" ");

    let total: f64 = keywords
        .iter()
        .map(|kw| match count_whole_word(&competitor_text, kw) {
            0 => 1.0,
            1..=2 => 0.7,
            3..=5 => 0.4,
            _ => 0.1,
        })
        .sum();
    total / keywords.len() as f64 * 100.0
}

fn uniqueness_credit(max_similarity: f64) -> f64 {
    if max_similarity < 0.4 {
        1.0
    } else if max_similarity < 0.6 {
        0.6
    } else if max_similarity < 0.8 {
        0.3
    } else {
        0.0
    }
}

/// Score the Competitive Position dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let competitors = ctx.doc.competitors();
    if competitors.is_empty() {
        return DimensionResult::neutral(
            Dimension::CompetitivePosition,
            NO_COMPETITORS_SCORE,
            &["keyword_differentiation", "value_prop_uniqueness"],
            "No competitor data available for comparison",
        );
    }

    let mut flags = Vec::new();
    let mut keywords = ctx.doc.keywords_by_tier(KeywordTier::Primary);
    keywords.extend(ctx.doc.keywords_by_tier(KeywordTier::Secondary));

    let keyword_diff = keyword_differentiation(&keywords, &competitors);
    if keyword_diff < OVERLAP_FLAG_THRESHOLD {
        flags.push("Keywords overlap heavily with competitors".to_string());
    }

    let competitor_bullets: Vec<String> = competitors
        .into_iter()
        .flat_map(|c| c.bullets)
        .collect();
    let uniqueness = ctx
        .bullet_similarity_score(&competitor_bullets, uniqueness_credit)
        .unwrap_or(DEFAULT_VALUE_PROP_UNIQUENESS);

    let total = 0.50 * keyword_diff + 0.50 * uniqueness;
    DimensionResult::new(
        Dimension::CompetitivePosition,
        total,
        [
            ("keyword_differentiation", keyword_diff),
            ("value_prop_uniqueness", uniqueness),
        ],
        flags,
    )
}
