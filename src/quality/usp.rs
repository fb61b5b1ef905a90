//! USP Effectiveness dimension.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::text::{meaningful_words, ngrams};
use regex::Regex;
use std::sync::LazyLock;

/// Coverage reported when there are no approved USPs.
pub const DEFAULT_COVERAGE: f64 = 70.0;
/// Differentiation reported when there is nothing to compare against.
pub const DEFAULT_DIFFERENTIATION: f64 = 75.0;

const COVERAGE_FLAG_THRESHOLD: f64 = 60.0;
const DIFFERENTIATION_FLAG_THRESHOLD: f64 = 60.0;
const POOR_CONCEPT_OVERLAP_PCT: f64 = 30.0;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));
static MEASUREMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\d+\s*(mg|ml|oz|lb|kg|g|cm|inch|"|'|%|hour|minute|day|year)"#)
        .expect("static regex")
});
static PROOF_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(tested|proven|certified|clinically|scientifically|lab|FDA|verified)")
        .expect("static regex")
});
static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(than|vs\.?|versus|compared|better|faster|stronger|more)")
        .expect("static regex")
});
static AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(patented|award|#1|best-selling|original|authentic)").expect("static regex")
});

/// Outcome of matching one USP against the listing copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptMatch {
    pub covered: bool,
    /// Share of meaningful words present, 0.0-1.0
    pub word_coverage: f64,
    pub phrase_matched: bool,
    pub concept_words: Vec<String>,
}

/// Match a USP claim against content by concept rather than literal text.
///
/// Required word coverage slides with concept size: all words for two or
/// fewer, 60% for three or four, 50% beyond. A 2- or 3-gram of the claim must
/// also appear verbatim unless the concept has two or fewer words.
#[must_use]
pub fn match_concept(usp_text: &str, content: &str) -> ConceptMatch {
    let concept_words = meaningful_words(usp_text);
    let content_lower = content.to_lowercase();

    let matched = concept_words
        .iter()
        .filter(|w| content_lower.contains(w.as_str()))
        .count();
    let word_coverage = if concept_words.is_empty() {
        0.0
    } else {
        matched as f64 / concept_words.len() as f64
    };

    let phrase_matched = ngrams(usp_text, 2)
        .iter()
        .chain(ngrams(usp_text, 3).iter())
        .any(|p| content_lower.contains(p.as_str()));

    let threshold = match concept_words.len() {
        0..=2 => 1.0,
        3..=4 => 0.6,
        _ => 0.5,
    };
    let covered = word_coverage >= threshold && (phrase_matched || concept_words.len() <= 2);

    ConceptMatch {
        covered,
        word_coverage,
        phrase_matched,
        concept_words,
    }
}

/// Fixed-weight checklist of proof signals, capped at 100.
#[must_use]
pub fn proof_strength(content: &str) -> f64 {
    let checks: [(&Regex, f64); 5] = [
        (&DIGITS, 20.0),
        (&MEASUREMENTS, 25.0),
        (&PROOF_WORDS, 25.0),
        (&COMPARISON, 15.0),
        (&AUTHORITY, 15.0),
    ];
    let total: f64 = checks
        .iter()
        .filter(|(re, _)| re.is_match(content))
        .map(|(_, points)| points)
        .sum();
    total.min(100.0)
}

fn differentiation_credit(max_similarity: f64) -> f64 {
    if max_similarity < 0.3 {
        1.0
    } else if max_similarity < 0.5 {
        0.7
    } else if max_similarity < 0.7 {
        0.4
    } else {
        0.1
    }
}

/// Score the USP Effectiveness dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let mut flags = Vec::new();
    let usps = ctx.doc.approved_usps();
    let content = ctx.title_and_bullets();

    let mut covered = 0usize;
    for usp in &usps {
        if usp.text.is_empty() {
            continue;
        }
        let m = match_concept(&usp.text, &content);
        if m.covered {
            covered += 1;
        } else if !m.concept_words.is_empty() {
            let pct = (m.word_coverage * 100.0).round();
            if pct < POOR_CONCEPT_OVERLAP_PCT {
                let preview: String = usp.text.chars().take(50).collect();
                flags.push(format!(
                    "USP concept poorly integrated: \"{preview}...\" ({pct}% concept overlap)"
                ));
            }
        }
    }

    let coverage = if usps.is_empty() {
        DEFAULT_COVERAGE
    } else {
        covered as f64 / usps.len() as f64 * 100.0
    };
    if coverage < COVERAGE_FLAG_THRESHOLD && !usps.is_empty() {
        flags.push(format!(
            "Low USP integration: {covered}/{} USP concepts adequately covered",
            usps.len()
        ));
    }

    let differentiation = if ctx.doc.competitors().is_empty() {
        DEFAULT_DIFFERENTIATION
    } else {
        ctx.bullet_similarity_score(&ctx.doc.competitor_bullets(), differentiation_credit)
            .unwrap_or(DEFAULT_DIFFERENTIATION)
    };
    if differentiation < DIFFERENTIATION_FLAG_THRESHOLD {
        flags.push("USP phrasing too similar to competitors".to_string());
    }

    let proof = proof_strength(&content);

    let total = 0.40 * coverage + 0.35 * differentiation + 0.25 * proof;
    DimensionResult::new(
        Dimension::UspEffectiveness,
        total,
        [
            ("coverage", coverage),
            ("differentiation", differentiation),
            ("proof_strength", proof),
        ],
        flags,
    )
}
