//! Customer Alignment dimension: intent-theme coverage and pain-point addressing.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::model::ThemeEntry;
use crate::text::words::{is_significant, significant_words};
use indexmap::IndexSet;

/// Score reported when there are no intent themes.
pub const NO_THEMES_SCORE: f64 = 70.0;
/// Pain-point addressing reported when no pain points are known.
pub const DEFAULT_PAIN_POINT_ADDRESSING: f64 = 75.0;

const PAIN_POINT_FLAG_THRESHOLD: f64 = 60.0;

fn theme_covered(theme: &ThemeEntry, content: &str) -> bool {
    if theme.name.is_empty() {
        return false;
    }
    let term_hit = theme
        .features
        .iter()
        .chain(&theme.pains)
        .chain(&theme.desires)
        .chain(&theme.keywords)
        .filter(|t| !t.is_empty())
        .any(|t| content.contains(t.to_lowercase().as_str()));
    if term_hit {
        return true;
    }
    theme
        .name
        .to_lowercase()
        .split_whitespace()
        .any(|w| is_significant(w) && content.contains(w))
}

/// Whether `section` addresses the (lower-cased) pain point.
fn addresses(pain: &str, words: &[String], section: &str) -> bool {
    if section.contains(pain) {
        return true;
    }
    match words.len() {
        0 => false,
        1 => section.contains(words[0].as_str()),
        n => {
            let needed = ((n as f64 * 0.5).ceil() as usize).max(2);
            words.iter().filter(|w| section.contains(w.as_str())).count() >= needed
        }
    }
}

/// Score the Customer Alignment dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let themes = ctx.doc.intent_themes();
    if themes.is_empty() {
        return DimensionResult::neutral(
            Dimension::CustomerAlignment,
            NO_THEMES_SCORE,
            &["intent_theme_coverage", "pain_point_addressing"],
            "No customer intent data available",
        );
    }

    let mut flags = Vec::new();
    let content = ctx.full_text_lower();
    let covered = themes
        .iter()
        .filter(|t| theme_covered(t, &content))
        .count();
    let theme_coverage = covered as f64 / themes.len() as f64 * 100.0;

    let usps = ctx.doc.approved_usps();
    let pain_points: IndexSet<&str> = themes
        .iter()
        .flat_map(|t| t.pains.iter())
        .chain(usps.iter().flat_map(|u| u.pains.iter()))
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();

    let addressing = if pain_points.is_empty() {
        DEFAULT_PAIN_POINT_ADDRESSING
    } else {
        let sections: Vec<&str> = ctx
            .bullets_lower
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ctx.description_lower.as_str()))
            .collect();
        let addressed = pain_points
            .iter()
            .filter(|p| {
                let lower = p.to_lowercase();
                let words = significant_words(&lower);
                sections.iter().any(|s| addresses(&lower, &words, s))
            })
            .count();
        addressed as f64 / pain_points.len() as f64 * 100.0
    };
    if addressing < PAIN_POINT_FLAG_THRESHOLD {
        flags.push("Customer pain points not adequately addressed".to_string());
    }

    let total = 0.50 * theme_coverage + 0.50 * addressing;
    DimensionResult::new(
        Dimension::CustomerAlignment,
        total,
        [
            ("intent_theme_coverage", theme_coverage),
            ("pain_point_addressing", addressing),
        ],
        flags,
    )
}
