//! Pure text and markup analyzers. Nothing in here performs I/O or logs.

pub mod keyword;
pub mod markup;
pub mod readability;
pub mod syllables;
pub mod text;

pub use keyword::{KeywordDensity, keyword_density};
pub use markup::{Presence, alt_presence, description_presence, title_presence};
pub use readability::readability_score;
pub use syllables::SyllableCounter;
pub use text::normalize;

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
