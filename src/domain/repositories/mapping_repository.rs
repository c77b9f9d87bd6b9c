//! Repository trait for url mapping data access.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of an insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Inserted(UrlMapping),
    /// Another mapping already owns the short code; nothing was written.
    CodeTaken,
}

/// Repository interface for the short code key space.
///
/// Implementations treat short codes as opaque keys. Shape validation happens
/// before a call ever reaches the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a mapping unless its short code is already taken.
    ///
    /// The existence check and the write are one atomic step: of two
    /// concurrent inserts with the same code, exactly one gets
    /// [`InsertOutcome::Inserted`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors. No row is
    /// left behind on failure.
    async fn insert(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Atomically adds one to the click counter.
    ///
    /// Returns `Ok(false)` when no mapping has this code. Never creates a row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors; the counter
    /// is unchanged in that case.
    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists every mapping, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError>;

    /// Removes a mapping. Returns whether a row existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    async fn delete(&self, short_code: &str) -> Result<bool, AppError>;
}
