//! Text metrics shared by the dimension scorers.
//!
//! - [`StringSimilarity`] / [`SyllableCounter`]: pluggable algorithm seams
//! - [`DiceSimilarity`]: default bullet-similarity metric
//! - [`flesch_reading_ease`]: readability over arbitrary copy
//! - word helpers for concept and keyword matching

mod similarity;
mod syllables;
mod traits;
pub mod words;

pub use similarity::{DiceSimilarity, LevenshteinSimilarity, SimilarityMetric};
pub use syllables::{flesch_reading_ease, HeuristicSyllableCounter, DEFAULT_FLESCH_SCORE};
pub use traits::{StringSimilarity, SyllableCounter};
pub use words::{count_whole_word, meaningful_words, ngrams, significant_words};
