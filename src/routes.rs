//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Service status (liveness)
//! - `GET  /{code}`            - Short link redirect
//! - `GET  /api/health`        - Liveness check
//! - `POST /api/shorten`       - Create a short link
//! - `GET  /api/stats/{code}`  - Link statistics
//!
//! Anything else answers 404 with the standard error body.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{not_found_handler, redirect_handler, service_status_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_status_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash trimming.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
