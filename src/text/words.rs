//! Word, phrase and n-gram helpers used by the concept-matching heuristics.

use regex::RegexBuilder;

/// Words too generic to carry a USP concept.
const CONCEPT_STOPWORDS: &[&str] = &[
    "the",
    "that",
    "this",
    "with",
    "from",
    "about",
    "being",
    "would",
    "could",
    "including",
    "opportunity",
    "providing",
    "help",
    "helps",
    "make",
    "makes",
    "when",
    "where",
    "which",
    "while",
    "your",
    "their",
    "those",
    "these",
];

/// Minimum length (exclusive) for a word to be considered significant.
pub const SIGNIFICANT_WORD_MIN_LEN: usize = 3;

/// Number of characters in `s` (not bytes).
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Whether a word is longer than [`SIGNIFICANT_WORD_MIN_LEN`] characters.
#[must_use]
pub fn is_significant(word: &str) -> bool {
    char_len(word) > SIGNIFICANT_WORD_MIN_LEN
}

/// Lower-cased whitespace tokens longer than three characters.
///
/// Used for partial keyword and pain-point matching.
#[must_use]
pub fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|w| is_significant(w))
        .map(str::to_lowercase)
        .collect()
}

/// Extract the "meaningful" words of a claim for concept matching.
///
/// A meaningful word is lower-cased, longer than three characters, made only
/// of ASCII letters and hyphens, and not in the concept stopword list.
#[must_use]
pub fn meaningful_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| is_significant(w))
        .filter(|w| w.bytes().all(|b| b.is_ascii_lowercase() || b == b'-'))
        .filter(|w| !CONCEPT_STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Lower-cased word n-grams of `text`, joined with single spaces.
///
/// Returns an empty list when `n` is zero or the text has fewer than `n` words.
#[must_use]
pub fn ngrams(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    words.windows(n).map(|w| w.join(" ")).collect()
}

/// Count case-insensitive, whole-word occurrences of `term` in `haystack`.
///
/// `term` is matched literally (regex metacharacters are escaped). An empty
/// term never matches.
#[must_use]
pub fn count_whole_word(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    let pattern = format!(r"\b{}\b", regex::escape(term));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.find_iter(haystack).count(),
        Err(e) => {
            tracing::debug!("Skipping whole-word count for {:?}: {}", term, e);
            0
        }
    }
}
