//! API route configuration.

use crate::api::handlers::{health_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET  /health`        - Liveness check
/// - `POST /shorten`       - Create a short link
/// - `GET  /stats/{code}`  - Mapping details and click count
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
}
