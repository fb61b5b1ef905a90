//! Readability dimension: Flesch band, bullet scannability, title clarity.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::text::flesch_reading_ease;
use crate::text::words::char_len;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Scannability reported when there are no bullets.
pub const DEFAULT_SCANNABILITY: f64 = 60.0;
/// Title clarity reported for an empty title.
pub const DEFAULT_TITLE_CLARITY: f64 = 60.0;

const COMPLEX_TEXT_THRESHOLD: f64 = 50.0;

static CAPS_LEAD_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s-]+[:–-]").expect("static regex"));
static TITLE_CASE_LEAD_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+\s[A-Z]").expect("static regex"));
static BENEFIT_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(help|support|provide|enable|allow|improve|enhance|make|keep)")
        .expect("static regex")
});
static CONNECTIVES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(and also|additionally,|furthermore,|moreover,)").expect("static regex")
});
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(count|pack|oz|ml|mg|g|lb|piece)").expect("static regex")
});

/// Map a raw Flesch score onto 0-100, with the 50-70 band scoring 100.
#[must_use]
pub fn normalize_flesch(flesch: f64) -> f64 {
    if (50.0..=70.0).contains(&flesch) {
        100.0
    } else if flesch < 50.0 {
        (50.0 + (flesch - 30.0) * 2.5).max(0.0)
    } else {
        (100.0 - (flesch - 70.0) * 2.0).max(0.0)
    }
}

/// Four 25-point checks for one bullet.
fn bullet_scannability(bullet: &str) -> f64 {
    if bullet.is_empty() {
        return 0.0;
    }
    let mut score = 0.0;

    let head: String = bullet.chars().take(30).collect();
    if CAPS_LEAD_IN.is_match(bullet) || TITLE_CASE_LEAD_IN.is_match(&head) {
        score += 25.0;
    }

    let len = char_len(bullet);
    if (150..=300).contains(&len) {
        score += 25.0;
    } else if (100..=400).contains(&len) {
        score += 15.0;
    }

    if BENEFIT_WORDS.is_match(bullet) {
        score += 25.0;
    }
    if !CONNECTIVES.is_match(bullet) {
        score += 25.0;
    }
    score
}

/// Average bullet scannability.
#[must_use]
pub fn scannability(bullets: &[String]) -> f64 {
    if bullets.is_empty() {
        return DEFAULT_SCANNABILITY;
    }
    let total: f64 = bullets.iter().map(|b| bullet_scannability(b)).sum();
    total / bullets.len() as f64
}

/// Four 25-point checks for the title, capped at 100.
#[must_use]
pub fn title_clarity(title: &str) -> f64 {
    if title.is_empty() {
        return DEFAULT_TITLE_CLARITY;
    }
    let mut score: f64 = 0.0;

    let len = char_len(title);
    if (150..=200).contains(&len) {
        score += 25.0;
    } else if (100..=250).contains(&len) {
        score += 15.0;
    }

    let lower = title.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in lower.split_whitespace() {
        *counts.entry(word).or_default() += 1;
    }
    let max_repeat = counts.values().copied().max().unwrap_or(0);
    if max_repeat <= 2 {
        score += 25.0;
    } else if max_repeat <= 3 {
        score += 15.0;
    }

    if QUANTITY.is_match(title) {
        score += 25.0;
    }
    if title.matches(',').count() >= 2 {
        score += 25.0;
    }

    score.min(100.0)
}

/// Score the Readability dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let mut flags = Vec::new();

    let flesch = flesch_reading_ease(&ctx.title_and_bullets(), ctx.syllables);
    let flesch_normalized = normalize_flesch(flesch);
    if flesch < COMPLEX_TEXT_THRESHOLD {
        flags.push("Content may be too complex for average readers".to_string());
    }

    let scan = scannability(ctx.bullets);
    let clarity = title_clarity(ctx.title);

    let total = 0.40 * flesch_normalized + 0.35 * scan + 0.25 * clarity;
    DimensionResult::new(
        Dimension::Readability,
        total,
        [
            ("flesch_score", flesch_normalized),
            ("scannability", scan),
            ("title_clarity", clarity),
        ],
        flags,
    )
}
