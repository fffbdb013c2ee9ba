//! End-to-end scans against a local fixture server
mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};

use common::{BAKERY_PAGE, BARE_PAGE, GARBLED_PAGE, UNREACHABLE, serve, serve_recording_peers};
use seo_scanner::analysis::Presence;
use seo_scanner::dictionary::PronunciationDictionary;
use seo_scanner::fetch::{FetchConfig, Fetcher};
use seo_scanner::scan::{ScanDiagnostic, ScanPhase, ScanRequest, Scanner};

fn scanner_with(dictionary: PronunciationDictionary) -> Scanner {
    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    Scanner::new(fetcher, Arc::new(dictionary))
}

fn scanner() -> Scanner {
    scanner_with(PronunciationDictionary::empty())
}

fn static_page(html: &'static str) -> Router {
    Router::new().route("/", get(move || async move { Html(html) }))
}

#[tokio::test]
async fn scans_a_complete_page() {
    let addr = serve(static_page(BAKERY_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "Bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Done);
    assert_eq!(result.keyword_count, 3);
    assert_eq!(result.total_words, 11);
    assert_eq!(result.keyword_density_pct, 27.27);
    assert!(result.keyword_found);
    assert_eq!(result.title_presence, Presence::Filled);
    assert_eq!(result.description_presence, Presence::Filled);
    assert_eq!(result.description_text.as_deref(), Some("Fresh bread daily"));
    assert_eq!(result.alt_presence, Presence::Filled);
    assert!(result.readability_score > 0.0 && result.readability_score <= 100.0);
    assert!(result.load_speed_seconds.is_some_and(|s| s >= 0.0));
    assert!(result.error.is_none());
    assert!(!result.is_degraded());
}

#[tokio::test]
async fn reports_missing_markup() {
    let addr = serve(static_page(BARE_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Done);
    assert_eq!(result.title_presence, Presence::Missing);
    assert_eq!(result.description_presence, Presence::Missing);
    assert_eq!(result.description_text, None);
    assert_eq!(result.alt_presence, Presence::Missing);
    assert_eq!(result.keyword_count, 0);
    assert_eq!(result.total_words, 4);
    assert!(!result.keyword_found);
}

#[tokio::test]
async fn empty_keyword_is_not_found() {
    let addr = serve(static_page(BAKERY_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Done);
    assert_eq!(result.keyword_count, 0);
    assert_eq!(result.keyword_density_pct, 0.0);
    assert!(!result.keyword_found);
}

#[tokio::test]
async fn unreachable_domain_degrades_without_error() {
    let request = ScanRequest::new(UNREACHABLE, "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Failed);
    assert_eq!(result.keyword_count, 0);
    assert_eq!(result.total_words, 0);
    assert_eq!(result.keyword_density_pct, 0.0);
    assert_eq!(result.title_presence, Presence::Missing);
    assert_eq!(result.readability_score, 0.0);
    assert_eq!(result.load_speed_seconds, None);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn server_error_status_fails_the_fetch() {
    let router = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    let addr = serve(router).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Failed);
    assert!(result.error.as_deref().is_some_and(|e| e.contains("500")));
    assert_eq!(result.load_speed_seconds, None);
}

#[tokio::test]
async fn load_speed_failure_is_independent_of_page_fetch() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new().route(
        "/",
        get(move || {
            let hits = hits.clone();
            async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    Html(BAKERY_PAGE).into_response()
                } else {
                    StatusCode::SERVICE_UNAVAILABLE.into_response()
                }
            }
        }),
    );
    let addr = serve(router).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Done);
    assert_eq!(result.keyword_count, 3);
    assert_eq!(result.load_speed_seconds, None);
    assert!(matches!(result.diagnostics.as_slice(), [ScanDiagnostic::LoadSpeedFailed(_)]));
}

#[tokio::test]
async fn dictionary_changes_the_readability_score() {
    let addr = serve(static_page(BAKERY_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();

    let heuristic = scanner().scan(&request).await;
    let dictionary = PronunciationDictionary::parse("bread B R EH1 D\nbread(2) B R EH1 AH0 D AH1\n");
    let with_dictionary = scanner_with(dictionary).scan(&request).await;

    assert!(with_dictionary.readability_score < heuristic.readability_score);
}

#[tokio::test]
async fn repeated_scans_agree() {
    let addr = serve(static_page(BAKERY_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();
    let scanner = scanner();

    let first = scanner.scan(&request).await;
    let second = scanner.scan(&request).await;

    assert_eq!(first.keyword_density_pct, second.keyword_density_pct);
    assert_eq!(first.readability_score, second.readability_score);
}

#[tokio::test]
async fn load_speed_is_timed_on_a_fresh_connection() {
    let (addr, peers) = serve_recording_peers(BAKERY_PAGE).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();
    let scanner = scanner();

    let result = scanner.scan(&request).await;
    assert!(result.load_speed_seconds.is_some());

    let peers = peers.lock().unwrap().clone();
    assert_eq!(peers.len(), 2);
    assert_ne!(peers[0], peers[1], "load speed reused the page fetch connection");
}

#[tokio::test]
async fn repeated_load_speed_measurements_never_share_a_connection() {
    let (addr, peers) = serve_recording_peers(BAKERY_PAGE).await;
    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    let url = url::Url::parse(&format!("http://{}/", addr)).unwrap();

    fetcher.measure_load_speed(&url).await.unwrap();
    fetcher.measure_load_speed(&url).await.unwrap();

    let peers = peers.lock().unwrap().clone();
    assert_eq!(peers.len(), 2);
    assert_ne!(peers[0], peers[1]);
}

#[tokio::test]
async fn undecodable_text_zeroes_readability_only() {
    let addr = serve(static_page(GARBLED_PAGE)).await;
    let request = ScanRequest::new(&addr.to_string(), "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Done);
    assert_eq!(result.readability_score, 0.0);
    assert_eq!(result.keyword_count, 2);
    assert_eq!(result.title_presence, Presence::Filled);
    assert!(result.load_speed_seconds.is_some());
    assert!(matches!(
        result.diagnostics.as_slice(),
        [ScanDiagnostic::TokenizationFailed(_)]
    ));
}

#[tokio::test]
async fn domain_with_scheme_fails_without_network() {
    let request = ScanRequest::new("http://example.com", "bread").unwrap();

    let result = scanner().scan(&request).await;

    assert_eq!(result.phase, ScanPhase::Failed);
    assert_eq!(result.keyword_count, 0);
    assert_eq!(result.load_speed_seconds, None);
    assert!(result.error.is_some());
}
