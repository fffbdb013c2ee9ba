//! Flesch reading-ease scoring.
//!
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`,
//! rounded to two decimals and clamped to `[0, 100]`.

use unicode_segmentation::UnicodeSegmentation;

use super::round2;
use super::syllables::SyllableCounter;
use super::text::normalize;
use crate::error::{AppError, Result};

struct Tokens<'a> {
    sentences: usize,
    words: Vec<&'a str>,
}

/// Scores `text`. Tokenization failures are returned so the caller can
/// degrade the score to 0 and record why.
pub fn readability_score(text: &str, syllables: &SyllableCounter) -> Result<f64> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Ok(0.0);
    }

    let tokens = tokenize(&normalized)?;
    let sentences = tokens.sentences as f64;
    let words = tokens.words.len() as f64;

    if tokens.sentences == 0 || tokens.words.is_empty() {
        return Ok(0.0);
    }

    let total_syllables: usize = tokens.words.iter().map(|w| syllables.count(w)).sum();

    let score = 206.835 - 1.015 * (words / sentences) - 84.6 * (total_syllables as f64 / words);

    Ok(round2(score).clamp(0.0, 100.0))
}

/// Splits normalized text into sentences and words.
///
/// Replacement characters and NULs mean the page was not decodable, so the
/// segmentation would be meaningless.
fn tokenize(text: &str) -> Result<Tokens<'_>> {
    if let Some(bad) = text.chars().find(|&c| c == char::REPLACEMENT_CHARACTER || c == '\0') {
        return Err(AppError::TokenizationError(format!(
            "text contains undecodable character U+{:04X}",
            bad as u32
        )));
    }

    let sentences = text
        .unicode_sentences()
        .filter(|s| !s.trim().is_empty())
        .count();
    let words = text.unicode_words().collect();

    Ok(Tokens { sentences, words })
}
