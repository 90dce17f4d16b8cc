//! HTTP surface of the PDF excerpt service.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod models;
pub mod state;

pub use state::AppState;

/// How long browsers may cache a CORS preflight response.
pub const CORS_MAX_AGE: Duration = Duration::from_secs(86400);

/// Build the fixed routing table with CORS and request logging.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/api/v1/extract", post(handlers::extract::extract))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
