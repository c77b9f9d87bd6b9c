//! Url mapping entity representing a shortened URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short code and the URL it resolves to.
///
/// Everything except `click_count` is immutable after creation, and
/// `click_count` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        click_count: i64,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            click_count,
        }
    }
}

/// Input data for inserting a new mapping.
///
/// The click counter is not part of the input: a fresh mapping always starts at 0.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewMapping {
    /// Stamps the candidate with the current time.
    pub fn now(short_code: String, original_url: String) -> Self {
        Self {
            short_code,
            original_url,
            created_at: Utc::now(),
        }
    }

    /// The mapping as it looks right after a successful insert.
    pub fn into_mapping(self) -> UrlMapping {
        UrlMapping::new(self.short_code, self.original_url, self.created_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            0,
        );

        assert_eq!(mapping.short_code, "abc123");
        assert_eq!(mapping.original_url, "https://example.com");
        assert_eq!(mapping.created_at, now);
        assert_eq!(mapping.click_count, 0);
    }

    #[test]
    fn test_new_mapping_starts_with_zero_clicks() {
        let new_mapping =
            NewMapping::now("xyz789".to_string(), "https://rust-lang.org".to_string());
        let created_at = new_mapping.created_at;

        let mapping = new_mapping.into_mapping();

        assert_eq!(mapping.short_code, "xyz789");
        assert_eq!(mapping.original_url, "https://rust-lang.org");
        assert_eq!(mapping.created_at, created_at);
        assert_eq!(mapping.click_count, 0);
    }
}
