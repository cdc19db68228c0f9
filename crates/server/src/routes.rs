pub mod projects;

use axum::{routing::get, Json, Router};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: the project form on `/`, health, and static assets
/// for every other path.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(projects::input_page).post(projects::submit_project))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
