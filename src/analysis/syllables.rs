//! Syllable estimation for single words.
//!
//! A word found in the pronunciation dictionary is counted exactly from its
//! stressed phonemes. Anything else goes through a vowel-group heuristic.

use std::sync::Arc;

use crate::dictionary::{Pronunciation, PronunciationDictionary};

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

#[derive(Debug, Clone)]
pub struct SyllableCounter {
    dictionary: Arc<PronunciationDictionary>,
}

impl SyllableCounter {
    pub fn new(dictionary: Arc<PronunciationDictionary>) -> Self {
        Self { dictionary }
    }

    /// A counter that always uses the heuristic.
    pub fn heuristic_only() -> Self {
        Self::new(Arc::new(PronunciationDictionary::empty()))
    }

    /// Syllables in `word`. Always at least 1 for a non-empty word.
    pub fn count(&self, word: &str) -> usize {
        // Lowercased once; dictionary keys are stored lowercase
        let word = word.to_lowercase();

        match self.dictionary.lookup(&word) {
            Some(variants) => dictionary_count(variants).max(1),
            None => heuristic_count(&word),
        }
    }
}

/// Largest number of stress-marked phonemes across all variants.
fn dictionary_count(variants: &[Pronunciation]) -> usize {
    variants
        .iter()
        .map(|phonemes| {
            phonemes
                .iter()
                .filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// One syllable per run of vowels, minus a trailing `e`, never below 1.
/// Expects a lowercased word.
fn heuristic_count(word: &str) -> usize {
    let mut count = 0usize;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }

    count.max(1)
}
