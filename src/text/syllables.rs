//! Syllable counting and the Flesch Reading Ease formula.

use super::traits::SyllableCounter;

/// Flesch score reported when the text has no sentences or no words.
pub const DEFAULT_FLESCH_SCORE: f64 = 60.0;

/// Vowel-group heuristic for English syllable counting.
///
/// Counts runs of vowels (`y` is a vowel except in first position), then
/// drops a silent trailing `e` and the silent `-es`/`-ed` endings. Any word
/// with at least one letter has at least one syllable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSyllableCounter;

impl SyllableCounter for HeuristicSyllableCounter {
    fn count(&self, word: &str) -> usize {
        let letters: Vec<u8> = word
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| b.to_ascii_lowercase())
            .collect();

        if letters.is_empty() {
            return 0;
        }
        if letters.len() <= 3 {
            return 1;
        }

        let mut count = 0usize;
        let mut prev_vowel = false;
        for (i, &b) in letters.iter().enumerate() {
            let vowel = is_vowel(b) || (b == b'y' && i > 0);
            if vowel && !prev_vowel {
                count += 1;
            }
            prev_vowel = vowel;
        }

        let n = letters.len();
        let last = letters[n - 1];
        let before_last = letters[n - 2];
        let third_last = letters[n - 3];

        if count > 1 {
            if last == b'e' && before_last != b'l' && !is_vowel(before_last) {
                // silent e: "make", "phone"
                count -= 1;
            } else if last == b'd' && before_last == b'e' && !matches!(third_last, b't' | b'd') {
                // "jumped", but not "wanted"
                count -= 1;
            } else if last == b's'
                && before_last == b'e'
                && !matches!(third_last, b's' | b'x' | b'z' | b'c' | b'g' | b'h')
            {
                // "makes", but not "boxes" or "matches"
                count -= 1;
            }
        }

        count.max(1)
    }

    fn name(&self) -> &'static str {
        "vowel-group-heuristic"
    }
}

const fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Classic Flesch Reading Ease over `text`.
///
/// Sentences are split on runs of `.`, `!` and `?`; words on whitespace.
/// Returns [`DEFAULT_FLESCH_SCORE`] when there are no sentences or words.
#[must_use]
pub fn flesch_reading_ease(text: &str, counter: &dyn SyllableCounter) -> f64 {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let words: Vec<&str> = text.split_whitespace().collect();

    if sentences == 0 || words.is_empty() {
        return DEFAULT_FLESCH_SCORE;
    }

    let syllables = counter.count_text(text);
    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;

    206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}
