//! Property-based tests for scoring and version resolution.
//!
//! Ensures scoring handles arbitrary listing copy without panicking and that
//! the aggregate invariants hold across random inputs.

use chrono::{TimeZone, Utc};
use lqs_tools::{
    extract_date_from_filename, group_versions, resolve_latest,
    quality::{round1, Dimension, Grade, LqsScorer, MAX_RECOMMENDATIONS},
    FileDescriptor, PipelineDocument,
};
use proptest::prelude::*;
use serde_json::json;

fn arb_document() -> impl Strategy<Value = PipelineDocument> {
    (
        "[A-Za-z0-9 ,<>®™-]{0,120}",
        prop::collection::vec("[A-Za-z0-9 .,!]{0,200}", 0..7),
        prop::collection::vec(("[a-z]{3,10}( [a-z]{3,10})?", 0.0f64..100.0, 0usize..4), 0..12),
        prop::collection::vec(("[a-z ]{0,40}", any::<bool>()), 0..4),
        0u32..6,
    )
        .prop_map(|(title, bullets, keywords, usps, banned)| {
            let tiers = ["Primary", "Secondary", "Long-tail", "Excluded"];
            let enriched: Vec<_> = keywords
                .into_iter()
                .map(|(text, strength, tier)| {
                    json!({
                        "keyword_canonical": text,
                        "priority_tier": tiers[tier],
                        "keyword_strength_score": strength,
                    })
                })
                .collect();
            let usps: Vec<_> = usps
                .into_iter()
                .map(|(point, approved)| json!({"point": point, "approved": approved}))
                .collect();
            PipelineDocument::from_value(json!({
                "ASIN": "B0PROPTEST",
                "Content": {"title": title, "bullet_points": bullets},
                "Keywords": {"enriched": enriched},
                "USPs": usps,
                "listing_creation": {"quality_report": {"banned_terms_found": banned}},
            }))
            .expect("generated documents satisfy the minimal shape")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn total_is_bounded(doc in arb_document()) {
        let result = LqsScorer::new().score(&doc);
        prop_assert!((0.0..=100.0).contains(&result.total), "total {}", result.total);
        for (dimension, r) in result.dimensions.iter() {
            prop_assert!(r.score <= 100, "{} scored {}", dimension.name(), r.score);
        }
    }

    #[test]
    fn total_is_rounded_sum_of_weighted(doc in arb_document()) {
        let result = LqsScorer::new().score(&doc);
        let sum: f64 = result.dimensions.iter().map(|(_, r)| r.weighted).sum();
        prop_assert!((result.total - round1(sum)).abs() < 1e-9);
    }

    #[test]
    fn recommendations_are_capped(doc in arb_document()) {
        let result = LqsScorer::new().score(&doc);
        prop_assert!(result.recommendations.len() <= MAX_RECOMMENDATIONS);

        // Dimension order is preserved
        let order: Vec<Dimension> = result.recommendations.iter().map(|r| r.dimension).collect();
        let mut sorted = order.clone();
        sorted.sort();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn grade_matches_total(doc in arb_document()) {
        let result = LqsScorer::new().score(&doc);
        prop_assert_eq!(result.grade, Grade::from_score(result.total));
    }

    #[test]
    fn scoring_is_deterministic(doc in arb_document()) {
        let scorer = LqsScorer::new();
        let a = scorer.score(&doc);
        let b = scorer.score(&doc);
        prop_assert_eq!(a.total, b.total);
        prop_assert_eq!(a.dimensions, b.dimensions);
        prop_assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn grade_thresholds_are_contiguous(tenths in 0u32..=1000) {
        let score = f64::from(tenths) / 10.0;
        let expected = match tenths {
            900..=1000 => Grade::A,
            800..=899 => Grade::B,
            700..=799 => Grade::C,
            600..=699 => Grade::D,
            _ => Grade::F,
        };
        prop_assert_eq!(Grade::from_score(score), expected);
    }

    #[test]
    fn decoding_arbitrary_json_never_panics(s in "\\PC{0,300}") {
        let _ = PipelineDocument::from_json_str(&s);
    }

    #[test]
    fn latest_version_has_greatest_date(
        days in prop::collection::vec((2000i32..2030, 1u32..13, 1u32..29), 1..10)
    ) {
        let modified = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut seen = std::collections::HashSet::new();
        let files: Vec<FileDescriptor> = days
            .into_iter()
            .filter(|d| seen.insert(*d))
            .map(|(y, m, d)| {
                FileDescriptor::from_key(format!("B0123ABCDE_{y:04}-{m:02}-{d:02}.json"), 10, modified)
            })
            .collect();

        let latest = resolve_latest(&files);
        prop_assert_eq!(latest.len(), 1);

        let max_date = files
            .iter()
            .filter_map(|f| extract_date_from_filename(&f.key))
            .max()
            .unwrap();
        prop_assert_eq!(extract_date_from_filename(&latest[0].key), Some(max_date));

        let history = group_versions(&files);
        let versions: Vec<u32> = history
            .history("B0123ABCDE")
            .unwrap()
            .iter()
            .map(|v| v.version)
            .collect();
        let expected: Vec<u32> = (1..=files.len() as u32).collect();
        prop_assert_eq!(versions, expected);
    }
}
