//! Liveness endpoints and the JSON fallback.
//!
//! None of these touch the store.

use axum::{Json, http::Uri};
use serde_json::json;

use crate::api::dto::health::{HealthResponse, ServiceStatus};
use crate::error::AppError;

/// `GET /`
pub async fn service_status_handler() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "healthy",
        service: "URL Shortener API",
    })
}

/// `GET /api/health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "URL Shortener API is running",
    })
}

/// Answers unknown routes with the standard error body.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Resource not found", json!({ "path": uri.path() }))
}
