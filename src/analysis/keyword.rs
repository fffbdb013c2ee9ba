use serde::Serialize;

use super::round2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub count: usize,
    pub total_words: usize,
    /// Percentage of words, two decimals.
    pub density: f64,
}

impl KeywordDensity {
    pub fn found(&self) -> bool {
        self.count > 0
    }
}

/// Counts case-insensitive, non-overlapping substring occurrences of
/// `keyword` in `text` against the whitespace-delimited word total.
pub fn keyword_density(text: &str, keyword: &str) -> KeywordDensity {
    let text = text.to_lowercase();
    let keyword = keyword.to_lowercase();

    let total_words = text.split_whitespace().count();
    let count = if keyword.is_empty() {
        0
    } else {
        text.matches(keyword.as_str()).count()
    };

    let density = if count > 0 && total_words > 0 {
        round2(100.0 * count as f64 / total_words as f64)
    } else {
        0.0
    };

    KeywordDensity {
        count,
        total_words,
        density,
    }
}
