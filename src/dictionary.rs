//! Pronunciation dictionary in the CMUdict text format.
//!
//! Each line maps a word to one pronunciation:
//!
//! ```text
//! ;;; comment
//! syllable  S IH1 L AH0 B AH0 L
//! read      R EH1 D
//! read(2)   R IY1 D
//! ```
//!
//! Vowel phonemes carry a trailing stress digit, which is what syllable
//! counting relies on. The dictionary is loaded once and only read afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// One pronunciation: a sequence of phoneme symbols such as `AH0` or `B`.
pub type Pronunciation = Vec<String>;

#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PronunciationDictionary {
    /// A dictionary with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            AppError::DictionaryError(format!("cannot read {}: {}", path.display(), e))
        })?;

        // Older CMUdict releases contain Latin-1 bytes
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Parses dictionary text. Lines without phonemes are skipped.
    pub fn parse(source: &str) -> Self {
        let mut dictionary = Self::empty();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let line = match line.find(" #") {
                Some(idx) => &line[..idx],
                None => line,
            };

            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };
            let phonemes: Pronunciation = tokens.map(str::to_string).collect();
            if phonemes.is_empty() {
                continue;
            }

            dictionary.insert(strip_variant(head), phonemes);
        }

        dictionary
    }

    pub fn from_entries<I, W, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: AsRef<str>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut dictionary = Self::empty();
        for (word, phonemes) in entries {
            dictionary.insert(word.as_ref(), phonemes.into_iter().map(Into::into).collect());
        }
        dictionary
    }

    fn insert(&mut self, word: &str, phonemes: Pronunciation) {
        // Keys are stored lowercased so lookups need no further folding
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phonemes);
    }

    /// All pronunciation variants for `word`, which must already be lowercase.
    pub fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `read(2)` -> `read`
fn strip_variant(head: &str) -> &str {
    match head.find('(') {
        Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
        _ => head,
    }
}
