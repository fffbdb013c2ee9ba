use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api::models::ScanQuery;
use crate::api::response;

const HOME_PAGE: &str = include_str!("../../templates/home.html");

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/form/", get(scan_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn scan_handler(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
) -> Response {
    let request = match query.into_request() {
        Ok(request) => request,
        Err(err) => {
            info!(error = %err, "rejected scan request");
            return err.into_response();
        }
    };

    info!(domain = request.domain(), keyword = request.keyword(), "scan requested");
    let start_time = std::time::Instant::now();

    let result = state.scanner.scan(&request).await;
    info!(elapsed = ?start_time.elapsed(), phase = ?result.phase, "scan finished");

    let message = result.error.clone().or_else(|| {
        result.is_degraded().then(|| {
            result
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
    });

    response::success(result, message).into_response()
}
