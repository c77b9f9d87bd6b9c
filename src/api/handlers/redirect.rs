//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject ill-formed codes as not found, without a store lookup
/// 2. Look up the mapping
/// 3. Atomically increment its click count
/// 4. Return 302 Found with `Location` set to the original URL
///
/// The visit is recorded before the response is sent, so a stats request
/// issued after the redirect always sees it.
///
/// # Errors
///
/// Returns 404 Not Found if the code is ill-formed or unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve_and_record(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
