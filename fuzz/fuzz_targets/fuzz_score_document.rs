#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz document decoding and scoring.
///
/// Anything that decodes must score without panicking, and the total must
/// stay within 0-100.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(result) = lqs_tools::LqsScorer::new().score_json(s) {
            assert!((0.0..=100.0).contains(&result.total));
        }
    }
});
