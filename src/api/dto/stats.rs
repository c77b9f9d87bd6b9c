//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;

/// Mapping details and click count for a short code.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UrlMapping> for StatsResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            click_count: mapping.click_count,
            created_at: mapping.created_at,
        }
    }
}
