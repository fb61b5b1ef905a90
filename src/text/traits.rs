//! Trait definitions for the pluggable text metrics.
//!
//! The dimension scorers only see these two narrow interfaces, so the
//! similarity and syllable algorithms can be swapped without touching any
//! scoring logic.

/// Fuzzy similarity between two strings.
///
/// Implementations must be symmetric and return a value in `[0.0, 1.0]`,
/// where `1.0` means the strings are considered identical.
pub trait StringSimilarity: Send + Sync {
    /// Compute the similarity between `a` and `b`.
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Maximum similarity of `text` against any of `candidates`.
    ///
    /// Returns `0.0` when there are no candidates.
    fn max_similarity(&self, text: &str, candidates: &[String]) -> f64 {
        candidates
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| self.similarity(text, c))
            .fold(0.0, f64::max)
    }

    /// Name of the algorithm (for diagnostics)
    fn name(&self) -> &'static str;
}

/// Syllable counting for a single word.
pub trait SyllableCounter: Send + Sync {
    /// Count syllables in `word`. Words without letters count as zero.
    fn count(&self, word: &str) -> usize;

    /// Total syllables across whitespace-separated words.
    fn count_text(&self, text: &str) -> usize {
        text.split_whitespace().map(|w| self.count(w)).sum()
    }

    /// Name of the algorithm (for diagnostics)
    fn name(&self) -> &'static str;
}
