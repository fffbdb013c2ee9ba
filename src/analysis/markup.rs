//! Presence checks for the SEO-relevant parts of the page head and images.

use std::fmt;

use serde::Serialize;

use crate::document::ParsedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presence {
    Filled,
    Missing,
}

impl Presence {
    fn from_bool(present: bool) -> Self {
        if present { Presence::Filled } else { Presence::Missing }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presence::Filled => f.write_str("Filled"),
            Presence::Missing => f.write_str("Missing"),
        }
    }
}

pub fn title_presence(doc: &ParsedDocument) -> Presence {
    Presence::from_bool(doc.title.as_deref().is_some_and(|t| !t.trim().is_empty()))
}

/// Filled with the `content` text when a description meta tag carries one.
pub fn description_presence(doc: &ParsedDocument) -> (Presence, Option<String>) {
    match &doc.description {
        Some(content) => (Presence::Filled, Some(content.clone())),
        None => (Presence::Missing, None),
    }
}

/// Filled only when every image has non-blank alt text. No images is Filled.
pub fn alt_presence(doc: &ParsedDocument) -> Presence {
    Presence::from_bool(
        doc.images
            .iter()
            .all(|img| img.alt.as_deref().is_some_and(|alt| !alt.trim().is_empty())),
    )
}
