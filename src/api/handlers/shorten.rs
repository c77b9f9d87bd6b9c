//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::build_short_url;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// A URL without a scheme gets `http://` prepended before validation.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "aB3xY9",
///   "original_url": "https://example.com/very/long/url",
///   "short_url": "http://localhost:5000/aB3xY9"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, lacks `url`, or the URL is invalid.
/// Returns 500 Internal Server Error if no unique code could be allocated or
/// the store is unavailable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(rejection_error)?;

    payload.validate()?;
    let raw_url = payload.url.unwrap_or_default();

    let mapping = state.link_service.create_short_link(&raw_url).await?;

    let short_url = build_short_url(&state.base_url, &mapping.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            short_url,
        }),
    ))
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON with 'Content-Type: application/json'"
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body",
        JsonRejection::JsonDataError(_) => {
            "Request body must be an object with a string 'url' field"
        }
        _ => "Unable to read request body",
    };

    AppError::bad_request(message, json!({ "reason": rejection.body_text() }))
}
