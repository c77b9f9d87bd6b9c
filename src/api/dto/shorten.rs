//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so a missing field surfaces as a
/// validation error with a readable message instead of a JSON rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. Normalized and validated by the link service.
    #[validate(required(message = "Missing 'url' field in request body"))]
    pub url: Option<String>,
}

/// A freshly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
}
