//! Scan orchestration: one page fetch, the analyzer battery, one timed
//! re-fetch, and assembly of the [`ScanResult`].
//!
//! A scan never fails once the request is valid. Each failing step degrades
//! its fields to defaults, logs a warning and records a [`ScanDiagnostic`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::analysis::{
    Presence, SyllableCounter, alt_presence, description_presence,
    keyword_density, readability_score, title_presence,
};
use crate::dictionary::PronunciationDictionary;
use crate::document::ParsedDocument;
use crate::error::{AppError, Result};
use crate::fetch::Fetcher;

/// A domain/keyword pair with a non-empty domain.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    domain: String,
    keyword: String,
}

impl ScanRequest {
    /// Only an empty domain is refused here. A domain that cannot be turned
    /// into a target URL fails the scan itself. The keyword may be empty.
    pub fn new(domain: &str, keyword: &str) -> Result<Self> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(AppError::InvalidRequest("domain must not be empty".to_string()));
        }

        Ok(Self {
            domain: domain.to_string(),
            keyword: keyword.to_string(),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `http://{domain}/`. The domain must be a bare host, optionally with a port.
    pub fn url(&self) -> Result<Url> {
        if self.domain.contains("://") || self.domain.contains('/') {
            return Err(AppError::FetchError(format!(
                "expected a bare domain, got '{}'",
                self.domain
            )));
        }

        Url::parse(&format!("http://{}/", self.domain))
            .map_err(|e| AppError::FetchError(format!("invalid domain '{}': {}", self.domain, e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPhase {
    Idle,
    Fetching,
    Analyzing,
    Done,
    Failed,
}

impl ScanPhase {
    pub fn can_advance_to(self, next: ScanPhase) -> bool {
        matches!(
            (self, next),
            (ScanPhase::Idle, ScanPhase::Fetching)
                | (ScanPhase::Fetching, ScanPhase::Analyzing)
                | (ScanPhase::Fetching, ScanPhase::Failed)
                | (ScanPhase::Analyzing, ScanPhase::Done)
        )
    }
}

/// A sub-operation that failed and was degraded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ScanDiagnostic {
    FetchFailed(String),
    TokenizationFailed(String),
    LoadSpeedFailed(String),
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanDiagnostic::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            ScanDiagnostic::TokenizationFailed(msg) => write!(f, "readability unavailable: {}", msg),
            ScanDiagnostic::LoadSpeedFailed(msg) => write!(f, "load speed unavailable: {}", msg),
        }
    }
}

/// Outcome of one scan, serialized with the keys the results page expects.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub domain: String,
    #[serde(rename = "query")]
    pub keyword: String,
    #[serde(rename = "query_count")]
    pub keyword_count: usize,
    pub total_words: usize,
    #[serde(rename = "keyword_density")]
    pub keyword_density_pct: f64,
    pub keyword_found: bool,
    #[serde(rename = "title")]
    pub title_presence: Presence,
    #[serde(rename = "description")]
    pub description_presence: Presence,
    pub description_text: Option<String>,
    #[serde(rename = "img_alt")]
    pub alt_presence: Presence,
    #[serde(rename = "read_score")]
    pub readability_score: f64,
    #[serde(rename = "load_speed")]
    pub load_speed_seconds: Option<f64>,
    pub phase: ScanPhase,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ScanDiagnostic>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanResult {
    /// The all-defaults record used when the page could not be fetched.
    fn failed(request: &ScanRequest, error: String) -> Self {
        Self {
            domain: request.domain.clone(),
            keyword: request.keyword.clone(),
            keyword_count: 0,
            total_words: 0,
            keyword_density_pct: 0.0,
            keyword_found: false,
            title_presence: Presence::Missing,
            description_presence: Presence::Missing,
            description_text: None,
            alt_presence: Presence::Missing,
            readability_score: 0.0,
            load_speed_seconds: None,
            phase: ScanPhase::Failed,
            error: Some(error.clone()),
            diagnostics: vec![ScanDiagnostic::FetchFailed(error)],
            scanned_at: Utc::now(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Runs scans. Cheap to share behind an `Arc`; holds no per-scan state.
#[derive(Debug, Clone)]
pub struct Scanner {
    fetcher: Fetcher,
    syllables: SyllableCounter,
}

impl Scanner {
    pub fn new(fetcher: Fetcher, dictionary: Arc<PronunciationDictionary>) -> Self {
        Self {
            fetcher,
            syllables: SyllableCounter::new(dictionary),
        }
    }

    #[tracing::instrument(skip_all, fields(domain = %request.domain(), keyword = %request.keyword()))]
    pub async fn scan(&self, request: &ScanRequest) -> ScanResult {
        let mut phase = ScanPhase::Idle;

        advance(&mut phase, ScanPhase::Fetching);
        let fetched = match request.url() {
            Ok(url) => self.fetcher.fetch_page(&url).await.map(|page| (url, page)),
            Err(err) => Err(err),
        };
        let (url, page) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                advance(&mut phase, ScanPhase::Failed);
                warn!(error = %err, "page fetch failed, returning defaults");
                return ScanResult::failed(request, err.to_string());
            }
        };
        debug!(
            status = page.status,
            bytes = page.body.len(),
            elapsed_seconds = page.elapsed_seconds,
            "page fetched"
        );

        advance(&mut phase, ScanPhase::Analyzing);
        let mut diagnostics = Vec::new();
        let document = ParsedDocument::parse(&page.body);

        let title = title_presence(&document);
        let (description, description_text) = description_presence(&document);
        let alt = alt_presence(&document);

        let density = keyword_density(&document.text, request.keyword());
        if density.found() {
            info!(count = density.count, "keyword found on page");
        } else {
            info!("keyword not found on page");
        }

        let readability = match readability_score(&document.text, &self.syllables) {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "readability scoring failed, using 0");
                diagnostics.push(ScanDiagnostic::TokenizationFailed(err.to_string()));
                0.0
            }
        };

        let load_speed = match self.fetcher.measure_load_speed(&url).await {
            Ok(seconds) => Some(seconds),
            Err(err) => {
                warn!(error = %err, "load speed measurement failed");
                diagnostics.push(ScanDiagnostic::LoadSpeedFailed(err.to_string()));
                None
            }
        };

        advance(&mut phase, ScanPhase::Done);
        info!(
            density = density.density,
            readability,
            load_speed = ?load_speed,
            "scan complete"
        );

        ScanResult {
            domain: request.domain().to_string(),
            keyword: request.keyword().to_string(),
            keyword_count: density.count,
            total_words: density.total_words,
            keyword_density_pct: density.density,
            keyword_found: density.found(),
            title_presence: title,
            description_presence: description,
            description_text,
            alt_presence: alt,
            readability_score: readability,
            load_speed_seconds: load_speed,
            phase,
            error: None,
            diagnostics,
            scanned_at: Utc::now(),
        }
    }
}

fn advance(phase: &mut ScanPhase, next: ScanPhase) {
    debug_assert!(phase.can_advance_to(next), "illegal scan transition {:?} -> {:?}", phase, next);
    debug!(from = ?phase, to = ?next, "scan phase");
    *phase = next;
}
