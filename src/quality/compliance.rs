//! Compliance dimension: upstream banned-term count plus marketplace format rules.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::text::words::char_len;
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

const TITLE_MAX_CHARS: usize = 200;
const TITLE_TOLERATED_CHARS: usize = 250;
const BULLET_MAX_CHARS: usize = 500;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static TRADEMARK_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[®™©]").expect("static regex"));
static BRAND_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)brand|company|Inc\.|LLC").expect("static regex"));
static ALL_CAPS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{5,}\b").expect("static regex"));

/// Banned-term sub-score from the upstream count.
#[must_use]
pub fn banned_terms_score(count: u32) -> f64 {
    match count {
        0 => 100.0,
        1 => 80.0,
        2 => 60.0,
        n => (100.0 - 25.0 * f64::from(n)).max(0.0),
    }
}

/// Format checklist result.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatCheck {
    pub score: f64,
    pub violations: Vec<String>,
}

/// Five 20-point format checks over title and bullets.
#[must_use]
pub fn check_format(title: &str, bullets: &[String]) -> FormatCheck {
    let mut score = 0.0;
    let mut violations = Vec::new();

    let title_len = char_len(title);
    if title_len <= TITLE_MAX_CHARS {
        score += 20.0;
    } else {
        if title_len <= TITLE_TOLERATED_CHARS {
            score += 10.0;
        }
        violations.push(format!(
            "Title is {title_len} characters (limit {TITLE_MAX_CHARS})"
        ));
    }

    let long_bullets = bullets
        .iter()
        .filter(|b| char_len(b) > BULLET_MAX_CHARS)
        .count();
    if long_bullets == 0 {
        score += 20.0;
    } else {
        violations.push(format!(
            "{long_bullets} bullet(s) exceed {BULLET_MAX_CHARS} characters"
        ));
    }

    let all_content = std::iter::once(title)
        .chain(bullets.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    if HTML_TAG.is_match(&all_content) {
        violations.push("HTML tags found in content".to_string());
    } else {
        score += 20.0;
    }

    if !TRADEMARK_SYMBOLS.is_match(&all_content) || BRAND_CONTEXT.is_match(&all_content) {
        score += 20.0;
    } else {
        violations.push("Trademark symbols used without brand context".to_string());
    }

    let caps: IndexSet<&str> = ALL_CAPS_WORD
        .find_iter(&all_content)
        .map(|m| m.as_str())
        .collect();
    if caps.is_empty() {
        score += 20.0;
    } else {
        let caps: Vec<&str> = caps.into_iter().collect();
        violations.push(format!("ALL-CAPS words found: {}", caps.join(", ")));
    }

    FormatCheck { score, violations }
}

/// Score the Compliance dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let mut flags = Vec::new();

    let banned = ctx.doc.banned_terms_found();
    let banned_score = banned_terms_score(banned);
    if banned > 0 {
        flags.push(format!("{banned} banned term(s) found in content"));
    }

    let format = check_format(ctx.title, ctx.bullets);
    flags.extend(format.violations);

    let total = 0.50 * banned_score + 0.50 * format.score;
    DimensionResult::new(
        Dimension::Compliance,
        total,
        [("banned_terms", banned_score), ("format_rules", format.score)],
        flags,
    )
}
