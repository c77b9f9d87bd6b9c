//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite repository for url mappings.
///
/// Uniqueness is enforced by the `short_code` primary key, and click counts
/// are incremented server-side, so the repository needs no in-process locking
/// and is safe to share across threads.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository over an existing, migrated pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url` and brings the schema up to date.
    ///
    /// File databases are created if missing and use WAL journaling. An
    /// in-memory database lives inside a single connection, so its pool is
    /// pinned to one connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the database cannot be
    /// opened, or a migration fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let in_memory = is_in_memory(database_url);

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(busy_timeout);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        MIGRATOR.run(&pool).await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Runs the embedded migrations against `pool`.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        MIGRATOR.run(pool).await?;
        Ok(())
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks that the database answers a trivial query.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Closes every connection. Further calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError> {
        let row = sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, click_count)
            VALUES (?1, ?2, ?3, 0)
            ON CONFLICT (short_code) DO NOTHING
            RETURNING short_code, original_url, created_at, click_count
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(mapping) => InsertOutcome::Inserted(mapping),
            None => InsertOutcome::CodeTaken,
        })
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_code, original_url, created_at, click_count
            FROM urls
            WHERE short_code = ?1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE short_code = ?1")
                .bind(short_code)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        let rows = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_code, original_url, created_at, click_count
            FROM urls
            ORDER BY created_at DESC, short_code
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = ?1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
