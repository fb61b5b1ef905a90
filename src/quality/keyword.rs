//! Keyword Optimization dimension.
//!
//! Selects the intended keyword set from the enriched keyword collection,
//! then scores strength-weighted coverage, title placement of high-value
//! keywords and tier-appropriate placement.

use super::dimension::{Dimension, DimensionResult, ScoringContext};
use crate::model::{KeywordEntry, KeywordTier};
use crate::text::words::significant_words;

/// Coverage reported when no intended keywords exist.
pub const DEFAULT_COVERAGE: f64 = 70.0;
/// Title placement reported when no high-value keywords exist.
pub const DEFAULT_TITLE_PLACEMENT: f64 = 75.0;
/// Tier alignment reported when no intended keywords exist.
pub const DEFAULT_TIER_ALIGNMENT: f64 = 80.0;
/// Strength assumed for keywords with a missing or zero score.
pub const DEFAULT_KEYWORD_STRENGTH: f64 = 50.0;

// Calibration constants for intended-keyword selection. Tunable.
const PSEUDO_PRIMARY_SHARE: f64 = 0.3;
const SECONDARY_SHARE: f64 = 0.5;
const LONG_TAIL_SHARE: f64 = 0.2;
const MIN_QUALIFYING_STRENGTH: f64 = 60.0;
const MIN_INTENDED: usize = 20;
const MAX_INTENDED: usize = 40;

const TITLE_KEYWORD_LIMIT: usize = 5;
const TITLE_KEYWORD_MIN_STRENGTH: f64 = 60.0;

const COVERAGE_FLAG_THRESHOLD: f64 = 50.0;
const TITLE_FLAG_THRESHOLD: f64 = 60.0;

/// A keyword selected for scoring.
#[derive(Debug, Clone)]
pub struct IntendedKeyword {
    pub entry: KeywordEntry,
    /// Primary, or a pseudo-primary Secondary when no Primary exist.
    pub high_priority: bool,
}

/// Pick the intended keywords from the enriched collection.
#[must_use]
pub fn select_intended(enriched: &[KeywordEntry]) -> Vec<IntendedKeyword> {
    if enriched.is_empty() {
        return Vec::new();
    }

    let mut chosen: Vec<(usize, bool)> = Vec::new();
    let contains = |chosen: &[(usize, bool)], idx: usize| chosen.iter().any(|(i, _)| *i == idx);

    let primary = tier_indices(enriched, KeywordTier::Primary);
    chosen.extend(primary.iter().map(|&i| (i, true)));

    let secondary = tier_indices(enriched, KeywordTier::Secondary);
    if primary.is_empty() && !secondary.is_empty() {
        let ranked = by_strength(enriched, secondary.clone());
        let take = share(ranked.len(), PSEUDO_PRIMARY_SHARE);
        chosen.extend(ranked.into_iter().take(take).map(|i| (i, true)));
    }

    let strong_secondary: Vec<usize> = secondary
        .iter()
        .copied()
        .filter(|&i| enriched[i].rank_strength() >= MIN_QUALIFYING_STRENGTH)
        .filter(|&i| !contains(&chosen, i))
        .collect();
    let ranked = by_strength(enriched, strong_secondary);
    let take = share(ranked.len(), SECONDARY_SHARE);
    chosen.extend(ranked.into_iter().take(take).map(|i| (i, false)));

    let strong_long_tail: Vec<usize> = tier_indices(enriched, KeywordTier::LongTail)
        .into_iter()
        .filter(|&i| enriched[i].rank_strength() >= MIN_QUALIFYING_STRENGTH)
        .collect();
    let ranked = by_strength(enriched, strong_long_tail);
    let take = share(ranked.len(), LONG_TAIL_SHARE);
    chosen.extend(ranked.into_iter().take(take).map(|i| (i, false)));

    let planned: Vec<usize> = (0..enriched.len())
        .filter(|&i| enriched[i].has_placement_plan && !contains(&chosen, i))
        .collect();
    chosen.extend(planned.into_iter().map(|i| (i, false)));

    if chosen.len() < MIN_INTENDED {
        let remaining: Vec<usize> = (0..enriched.len())
            .filter(|&i| !contains(&chosen, i) && !enriched[i].is_tier(KeywordTier::Excluded))
            .collect();
        let needed = MIN_INTENDED - chosen.len();
        let ranked = by_strength(enriched, remaining);
        chosen.extend(ranked.into_iter().take(needed).map(|i| (i, false)));
    } else if chosen.len() > MAX_INTENDED {
        chosen.sort_by(|a, b| {
            enriched[b.0]
                .rank_strength()
                .total_cmp(&enriched[a.0].rank_strength())
        });
        chosen.truncate(MAX_INTENDED);
    }

    chosen
        .into_iter()
        .map(|(i, high_priority)| IntendedKeyword {
            entry: enriched[i].clone(),
            high_priority,
        })
        .collect()
}

fn tier_indices(enriched: &[KeywordEntry], tier: KeywordTier) -> Vec<usize> {
    (0..enriched.len())
        .filter(|&i| enriched[i].is_tier(tier))
        .collect()
}

/// Stable sort of indices by descending strength.
fn by_strength(enriched: &[KeywordEntry], mut indices: Vec<usize>) -> Vec<usize> {
    indices.sort_by(|&a, &b| {
        enriched[b]
            .rank_strength()
            .total_cmp(&enriched[a].rank_strength())
    });
    indices
}

/// `ceil(len × fraction)`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn share(len: usize, fraction: f64) -> usize {
    (len as f64 * fraction).ceil() as usize
}

/// Partial credit for a keyword missing as a whole phrase.
fn word_overlap_credit(keyword: &str, content: &str) -> f64 {
    let words = significant_words(keyword);
    if words.is_empty() {
        return 0.0;
    }
    let matched = words.iter().filter(|w| content.contains(w.as_str())).count();
    let rate = matched as f64 / words.len() as f64;
    if rate >= 1.0 {
        0.9
    } else if rate >= 0.75 {
        0.7
    } else if rate >= 0.5 {
        0.5
    } else {
        0.0
    }
}

/// Whether at least half the significant words of `keyword` appear in
/// `section`; exact match for keywords with no significant words.
fn appears_by_words(keyword: &str, section: &str) -> bool {
    let words = significant_words(keyword);
    if words.is_empty() {
        return section.contains(keyword);
    }
    let matched = words.iter().filter(|w| section.contains(w.as_str())).count();
    matched as f64 / words.len() as f64 >= 0.5
}

struct Coverage {
    weighted: f64,
    simple: f64,
    used: f64,
}

fn coverage(intended: &[IntendedKeyword], content: &str) -> Coverage {
    let mut total_strength = 0.0;
    let mut used_strength = 0.0;
    let mut used = 0.0;

    for kw in intended {
        let strength = match kw.entry.strength {
            Some(s) if s != 0.0 => s,
            _ => DEFAULT_KEYWORD_STRENGTH,
        };
        total_strength += strength;

        let text = kw.entry.text.as_str();
        if text.is_empty() {
            continue;
        }
        let credit = if content.contains(text) {
            1.0
        } else {
            word_overlap_credit(text, content)
        };
        used += credit;
        used_strength += strength * credit;
    }

    let weighted = if total_strength > 0.0 {
        used_strength / total_strength * 100.0
    } else {
        DEFAULT_COVERAGE
    };
    let simple = if intended.is_empty() {
        DEFAULT_COVERAGE
    } else {
        used / intended.len() as f64 * 100.0
    };

    Coverage {
        weighted,
        simple,
        used,
    }
}

/// High-value keywords for the title: Primary, else the top five with
/// strength above 60.
fn title_candidates(enriched: &[KeywordEntry]) -> Vec<&KeywordEntry> {
    let primary: Vec<&KeywordEntry> = enriched
        .iter()
        .filter(|k| k.is_tier(KeywordTier::Primary))
        .collect();
    if !primary.is_empty() {
        return primary;
    }
    let mut strong: Vec<&KeywordEntry> = enriched
        .iter()
        .filter(|k| k.rank_strength() > TITLE_KEYWORD_MIN_STRENGTH)
        .collect();
    strong.sort_by(|a, b| b.rank_strength().total_cmp(&a.rank_strength()));
    strong.truncate(TITLE_KEYWORD_LIMIT);
    strong
}

fn tier_alignment(intended: &[IntendedKeyword], ctx: &ScoringContext<'_>) -> f64 {
    let mut score = 0.0;
    let mut max_score = 0.0;

    for kw in intended {
        let text = kw.entry.text.as_str();
        if text.is_empty() {
            continue;
        }
        max_score += 1.0;

        let in_title = appears_by_words(text, &ctx.title_lower);
        let in_description = appears_by_words(text, &ctx.description_lower);
        let in_any_bullet = ctx
            .bullets_lower
            .iter()
            .any(|b| appears_by_words(text, b));

        score += if kw.high_priority {
            let in_top_bullets = ctx
                .bullets_lower
                .iter()
                .take(2)
                .any(|b| appears_by_words(text, b));
            if in_title {
                1.0
            } else if in_top_bullets {
                0.75
            } else if in_any_bullet {
                0.5
            } else if in_description {
                0.25
            } else {
                0.0
            }
        } else if in_any_bullet {
            1.0
        } else if in_description {
            0.75
        } else if in_title {
            0.5
        } else {
            0.0
        };
    }

    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        DEFAULT_TIER_ALIGNMENT
    }
}

/// Score the Keyword Optimization dimension.
pub fn score(ctx: &ScoringContext<'_>) -> DimensionResult {
    let mut flags = Vec::new();
    let enriched = ctx.doc.enriched_keywords();
    let intended = select_intended(&enriched);

    let content = ctx.full_text_lower();
    let cov = coverage(&intended, &content);
    if cov.simple < COVERAGE_FLAG_THRESHOLD {
        flags.push(format!(
            "Low keyword coverage: {}/{} intended keywords used ({}%)",
            format_count(cov.used),
            intended.len(),
            cov.simple.round()
        ));
    }

    let candidates = title_candidates(&enriched);
    let expected = candidates.len().min(TITLE_KEYWORD_LIMIT);
    let in_title = candidates
        .iter()
        .filter(|k| !k.text.is_empty() && ctx.title_lower.contains(k.text.as_str()))
        .count();
    let title_placement = if expected > 0 {
        (in_title as f64 / expected as f64 * 100.0).min(100.0)
    } else {
        DEFAULT_TITLE_PLACEMENT
    };
    if title_placement < TITLE_FLAG_THRESHOLD && !candidates.is_empty() {
        flags.push(format!(
            "Only {in_title}/{expected} high-value keywords in title"
        ));
    }

    let alignment = if intended.is_empty() {
        DEFAULT_TIER_ALIGNMENT
    } else {
        tier_alignment(&intended, ctx)
    };

    let total = 0.40 * cov.weighted + 0.30 * title_placement + 0.30 * alignment;
    DimensionResult::new(
        Dimension::KeywordOptimization,
        total,
        [
            ("coverage", cov.weighted),
            ("title_placement", title_placement),
            ("tier_alignment", alignment),
        ],
        flags,
    )
}

/// Fractional counts print with at most one decimal.
fn format_count(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentAccessor, PipelineDocument};
    use crate::text::{DiceSimilarity, HeuristicSyllableCounter};
    use serde_json::json;

    fn kw(text: &str, tier: Option<KeywordTier>, strength: Option<f64>) -> KeywordEntry {
        KeywordEntry {
            text: text.to_string(),
            tier,
            strength,
            has_placement_plan: false,
        }
    }

    fn run(value: serde_json::Value) -> DimensionResult {
        let doc = PipelineDocument::from_value(value).unwrap();
        let ctx = ScoringContext::new(
            DocumentAccessor::new(&doc),
            &DiceSimilarity,
            &HeuristicSyllableCounter,
        );
        score(&ctx)
    }

    #[test]
    fn test_select_empty() {
        assert!(select_intended(&[]).is_empty());
    }

    #[test]
    fn test_pseudo_primary_when_no_primary() {
        let enriched: Vec<KeywordEntry> = (0..10_i32)
            .map(|i| kw(&format!("kw{i}"), Some(KeywordTier::Secondary), Some(f64::from(i * 10))))
            .collect();
        let intended = select_intended(&enriched);
        let high: Vec<&str> = intended
            .iter()
            .filter(|k| k.high_priority)
            .map(|k| k.entry.text.as_str())
            .collect();
        // top 30% of ten secondaries by strength
        assert_eq!(high, vec!["kw9", "kw8", "kw7"]);
        // backfill brings the set to every non-excluded keyword (below 20)
        assert_eq!(intended.len(), 10);
    }

    #[test]
    fn test_excluded_never_backfilled() {
        let enriched = vec![
            kw("a", Some(KeywordTier::Primary), Some(90.0)),
            kw("b", Some(KeywordTier::Excluded), Some(99.0)),
            kw("c", None, Some(10.0)),
        ];
        let texts: Vec<String> = select_intended(&enriched)
            .into_iter()
            .map(|k| k.entry.text)
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_trimmed_to_forty() {
        let enriched: Vec<KeywordEntry> = (0..50_i32)
            .map(|i| kw(&format!("p{i}"), Some(KeywordTier::Primary), Some(f64::from(i))))
            .collect();
        let intended = select_intended(&enriched);
        assert_eq!(intended.len(), MAX_INTENDED);
        assert_eq!(intended[0].entry.text, "p49");
        assert!(intended.iter().all(|k| k.high_priority));
    }

    #[test]
    fn test_long_tail_share() {
        let mut enriched = Vec::new();
        for i in 0..25 {
            enriched.push(kw(&format!("p{i}"), Some(KeywordTier::Primary), Some(50.0)));
        }
        for i in 0..10 {
            enriched.push(kw(&format!("l{i}"), Some(KeywordTier::LongTail), Some(70.0)));
        }
        let intended = select_intended(&enriched);
        // 25 primaries + ceil(10 × 0.2) long-tail, no backfill needed
        assert_eq!(intended.len(), 27);
    }

    #[test]
    fn test_word_overlap_credit_steps() {
        assert_eq!(word_overlap_credit("stainless steel", "steel and stainless"), 0.9);
        assert_eq!(word_overlap_credit("insulated steel water bottle", "steel water bottle"), 0.7);
        assert_eq!(word_overlap_credit("stainless steel", "steel only"), 0.5);
        assert_eq!(word_overlap_credit("big mug", "big mug"), 0.0);
    }

    #[test]
    fn test_exact_coverage_scenario() {
        let bullet = |n: usize| {
            let base = format!("Bullet {n} mentions widget pack and bpa free plastic. ");
            base.repeat(10).chars().take(200).collect::<String>()
        };
        let bullets: Vec<String> = (1..=5).map(bullet).collect();
        let r = run(json!({
            "ASIN": "B0123ABCDE",
            "Content": {
                "title": "Widget, 12-Pack, BPA Free",
                "bullet_points": bullets
            },
            "Keywords": {"enriched": [
                {"keyword": "widget", "priority_tier": "Primary", "keyword_strength_score": 90},
                {"keyword": "bpa free", "priority_tier": "Primary", "keyword_strength_score": 80},
                {"keyword": "pack", "priority_tier": "Primary", "keyword_strength_score": 70}
            ]}
        }));
        assert_eq!(r.sub_score("coverage"), Some(100));
        assert_eq!(r.sub_score("title_placement"), Some(100));
        assert_eq!(r.sub_score("tier_alignment"), Some(100));
        assert_eq!(r.score, 100);
        assert!(r.flags.is_empty());
    }

    #[test]
    fn test_no_keywords_defaults() {
        let r = run(json!({"Content": {"title": "Widget", "bullet_points": ["A bullet"]}}));
        assert_eq!(r.sub_score("coverage"), Some(70));
        assert_eq!(r.sub_score("title_placement"), Some(75));
        assert_eq!(r.sub_score("tier_alignment"), Some(80));
        // 0.4×70 + 0.3×75 + 0.3×80
        assert_eq!(r.score, 75);
        assert!(r.flags.is_empty());
    }

    #[test]
    fn test_low_coverage_flags() {
        let r = run(json!({
            "Content": {"title": "Plain mug", "bullet_points": ["Holds coffee"]},
            "Keywords": {"enriched": [
                {"keyword": "titanium flask", "priority_tier": "Primary", "keyword_strength_score": 90},
                {"keyword": "vacuum sealed", "priority_tier": "Primary", "keyword_strength_score": 80}
            ]}
        }));
        assert_eq!(r.sub_score("coverage"), Some(0));
        assert!(r
            .flags
            .iter()
            .any(|f| f == "Low keyword coverage: 0/2 intended keywords used (0%)"));
        assert!(r
            .flags
            .iter()
            .any(|f| f == "Only 0/2 high-value keywords in title"));
    }

    #[test]
    fn test_low_priority_in_title_only_gets_half_credit() {
        let r = run(json!({
            "Content": {"title": "Ceramic Mug", "bullet_points": ["Dishwasher safe"]},
            "Keywords": {"enriched": [
                {"keyword": "ceramic", "priority_tier": "Long-tail", "keyword_strength_score": 40}
            ]}
        }));
        assert_eq!(r.sub_score("tier_alignment"), Some(50));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(1.6000000000000001), "1.6");
    }
}
