//! URL normalization and validation.
//!
//! Gatekeeps what may enter the store: [`normalize_url`] canonicalizes raw
//! user input, [`is_valid_url`] decides whether the result is an acceptable
//! absolute HTTP(S) URL. Both are pure.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Absolute-URL shape: `scheme://host[:port][/path][?query]`.
///
/// Host is a dotted hostname ending in an alphabetic TLD, `localhost`, or a
/// dotted-quad IPv4 address.
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?",
        r"|localhost",
        r"|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})",
        r"(?::[0-9]+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("URL shape pattern is valid")
});

/// Reasons a submitted URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Invalid URL format")]
    InvalidFormat,
}

/// Trims surrounding whitespace and adds `http://` when no HTTP(S) scheme is present.
///
/// Nothing else about the string changes. Applying it twice gives the same
/// result as applying it once.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("  github.com "), "http://github.com");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// assert_eq!(normalize_url("   "), "");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Returns true if `url` is an absolute HTTP(S) URL with a usable host.
///
/// Expects already-normalized input (see [`normalize_url`]).
pub fn is_valid_url(url: &str) -> bool {
    check_url(url).is_ok()
}

/// Normalizes then validates raw input, returning the stored form of the URL.
///
/// # Errors
///
/// Returns a [`UrlValidationError`] describing why the input was refused.
pub fn sanitize_url(raw: &str) -> Result<String, UrlValidationError> {
    let normalized = normalize_url(raw);
    check_url(&normalized)?;
    Ok(normalized)
}

fn check_url(url: &str) -> Result<(), UrlValidationError> {
    if url.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // Stored URLs end up in a `Location` header, which cannot carry control characters.
    if url.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat);
    }

    let parsed = Url::parse(url).map_err(|_| UrlValidationError::InvalidFormat)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat);
    }

    if !URL_SHAPE.is_match(url) {
        return Err(UrlValidationError::InvalidFormat);
    }

    Ok(())
}
