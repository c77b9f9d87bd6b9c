//! Short link creation, resolution and administration.

use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_short_code};
use crate::utils::url_validator::sanitize_url;
use serde_json::json;

/// Maximum number of random codes drawn for a single create.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Owns the only path into the mapping store: URLs are sanitized before any
/// store interaction, codes are allocated with a bounded retry, and visits go
/// through the repository's atomic increment.
pub struct LinkService<R: MappingRepository> {
    repository: Arc<R>,
}

impl<R: MappingRepository> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a short link for a raw, user-supplied URL.
    ///
    /// The URL is normalized and validated first; on rejection the store is
    /// never touched. Codes are drawn at random and inserted atomically; a
    /// taken code triggers a fresh draw, up to [`MAX_CODE_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid.
    /// Returns [`AppError::CollisionExhausted`] if every draw collided.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn create_short_link(&self, raw_url: &str) -> Result<UrlMapping, AppError> {
        let original_url = sanitize_url(raw_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let candidate = NewMapping::now(generate_code(), original_url.clone());

            match self.repository.insert(candidate).await? {
                InsertOutcome::Inserted(mapping) => {
                    tracing::info!(
                        short_code = %mapping.short_code,
                        original_url = %mapping.original_url,
                        "Created short URL"
                    );
                    return Ok(mapping);
                }
                InsertOutcome::CodeTaken => {
                    tracing::debug!(attempt, "Short code collision, drawing a new one");
                }
            }
        }

        tracing::warn!(
            attempts = MAX_CODE_ATTEMPTS,
            "Unable to allocate a unique short code"
        );

        Err(AppError::collision_exhausted(
            "Unable to generate unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Looks up a mapping by code without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn get_mapping(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))
    }

    /// Adds one visit to an existing mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code; no row is created.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn record_visit(&self, short_code: &str) -> Result<(), AppError> {
        if self.repository.increment_clicks(short_code).await? {
            Ok(())
        } else {
            Err(not_found(short_code))
        }
    }

    /// Resolves a short code for a redirect and counts the visit.
    ///
    /// Ill-formed codes are reported as not found without a store round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is ill-formed or unknown.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn resolve_and_record(&self, short_code: &str) -> Result<String, AppError> {
        if !is_valid_short_code(short_code) {
            return Err(AppError::not_found(
                "Invalid short code format",
                json!({ "code": short_code }),
            ));
        }

        let mapping = self.get_mapping(short_code).await?;
        self.record_visit(short_code).await?;

        tracing::info!(
            short_code = %short_code,
            original_url = %mapping.original_url,
            "Redirect"
        );

        Ok(mapping.original_url)
    }

    /// Returns the mapping and its click count for the stats endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code is ill-formed.
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn get_stats(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        if !is_valid_short_code(short_code) {
            return Err(AppError::bad_request(
                "Invalid short code format",
                json!({ "code": short_code }),
            ));
        }

        self.get_mapping(short_code).await
    }

    /// Lists every mapping. Administrative use only.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_all().await
    }

    /// Removes a mapping. Administrative use only.
    ///
    /// Returns whether a mapping existed and was removed.
    pub async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let removed = self.repository.delete(short_code).await?;
        if removed {
            tracing::info!(short_code = %short_code, "Deleted short URL");
        }
        Ok(removed)
    }
}

/// Constructs the full short URL from the public base URL and a code.
pub fn build_short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("Short code not found", json!({ "code": short_code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_mapping(code: &str, url: &str, clicks: i64) -> UrlMapping {
        UrlMapping::new(code.to_string(), url.to_string(), Utc::now(), clicks)
    }

    fn service(repo: MockMappingRepository) -> LinkService<MockMappingRepository> {
        LinkService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_insert()
            .withf(|m| m.original_url == "https://example.com" && m.short_code.len() == 6)
            .times(1)
            .returning(|m| Ok(InsertOutcome::Inserted(m.into_mapping())));

        let mapping = service(mock_repo)
            .create_short_link("https://example.com")
            .await
            .unwrap();

        assert_eq!(mapping.original_url, "https://example.com");
        assert_eq!(mapping.click_count, 0);
        assert!(is_valid_short_code(&mapping.short_code));
    }

    #[tokio::test]
    async fn test_create_short_link_normalizes_url() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_insert()
            .withf(|m| m.original_url == "http://github.com")
            .times(1)
            .returning(|m| Ok(InsertOutcome::Inserted(m.into_mapping())));

        let mapping = service(mock_repo)
            .create_short_link("  github.com ")
            .await
            .unwrap();

        assert_eq!(mapping.original_url, "http://github.com");
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url_skips_store() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_insert().times(0);

        let svc = service(mock_repo);

        for bad in [
            "not-a-url",
            "ftp://example.com",
            "https://",
            "http://.com",
            "",
        ] {
            let err = svc.create_short_link(bad).await.unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_create_short_link_retries_on_collision() {
        let mut mock_repo = MockMappingRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_insert()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|_| Ok(InsertOutcome::CodeTaken));
        mock_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|m| Ok(InsertOutcome::Inserted(m.into_mapping())));

        let result = service(mock_repo)
            .create_short_link("https://example.com")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_gives_up_after_bound() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_insert()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Ok(InsertOutcome::CodeTaken));

        let err = service(mock_repo)
            .create_short_link("https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CollisionExhausted { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_storage_error_is_not_retried() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::storage_unavailable("db down", json!({}))));

        let err = service(mock_repo)
            .create_short_link("https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_get_mapping_not_found() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock_repo).get_mapping("zzzzzz").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_record_visit_unknown_code() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(false));

        let err = service(mock_repo).record_visit("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_record_counts_visit() {
        let mut mock_repo = MockMappingRepository::new();
        let mapping = create_test_mapping("abc123", "https://example.com/target", 4);

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(true));

        let url = service(mock_repo)
            .resolve_and_record("abc123")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_and_record_unknown_code_does_not_increment() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_increment_clicks().times(0);

        let err = service(mock_repo)
            .resolve_and_record("abc123")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_record_malformed_code_skips_store() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_find_by_code().times(0);
        mock_repo.expect_increment_clicks().times(0);

        let svc = service(mock_repo);

        for bad in ["abc", "short", "has space", "nonexistent"] {
            let err = svc.resolve_and_record(bad).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_get_stats_malformed_code_is_bad_request() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_find_by_code().times(0);

        let err = service(mock_repo).get_stats("short").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_stats_does_not_increment() {
        let mut mock_repo = MockMappingRepository::new();
        let mapping = create_test_mapping("abc123", "https://example.com", 7);

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_repo.expect_increment_clicks().times(0);

        let stats = service(mock_repo).get_stats("abc123").await.unwrap();

        assert_eq!(stats.click_count, 7);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .withf(|code| code == "zzzzzz")
            .returning(|_| Ok(false));

        let svc = service(mock_repo);

        assert!(svc.delete("abc123").await.unwrap());
        assert!(!svc.delete("zzzzzz").await.unwrap());
    }

    #[test]
    fn test_build_short_url() {
        assert_eq!(
            build_short_url("http://localhost:5000", "abc123"),
            "http://localhost:5000/abc123"
        );
        assert_eq!(
            build_short_url("https://s.example.com/", "abc123"),
            "https://s.example.com/abc123"
        );
    }
}
