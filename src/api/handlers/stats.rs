//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the mapping and click count for a short code.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Reading stats does not count as a visit.
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3xY9",
///   "original_url": "https://www.github.com",
///   "click_count": 1,
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the code is not 6 alphanumeric characters.
/// Returns 404 Not Found if the code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let mapping = state.link_service.get_stats(&code).await?;

    Ok(Json(mapping.into()))
}
