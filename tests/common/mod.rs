#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use url_shortener::application::services::LinkService;
use url_shortener::infrastructure::persistence::SqliteMappingRepository;
use url_shortener::routes::{app_router, router};
use url_shortener::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:5000";

/// Opens a fresh, migrated in-memory store.
pub async fn memory_repository() -> Arc<SqliteMappingRepository> {
    let repo = SqliteMappingRepository::connect("sqlite::memory:", 1, Duration::from_secs(5))
        .await
        .unwrap();
    Arc::new(repo)
}

/// Opens a migrated file-backed store with a multi-connection pool.
pub async fn file_repository(
    dir: &tempfile::TempDir,
    max_connections: u32,
) -> Arc<SqliteMappingRepository> {
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let repo = SqliteMappingRepository::connect(&url, max_connections, Duration::from_secs(30))
        .await
        .unwrap();
    Arc::new(repo)
}

pub async fn create_test_state() -> (AppState, Arc<SqliteMappingRepository>) {
    let repo = memory_repository().await;
    let link_service = Arc::new(LinkService::new(repo.clone()));

    (AppState::new(link_service, TEST_BASE_URL), repo)
}

/// Full application router over a fresh in-memory store.
pub async fn create_test_server() -> (TestServer, Arc<SqliteMappingRepository>) {
    let (state, repo) = create_test_state().await;
    let server = TestServer::new(router(state)).unwrap();

    (server, repo)
}

/// The service exactly as `server::run` mounts it, path normalization included.
pub async fn create_app_server() -> (TestServer, Arc<SqliteMappingRepository>) {
    let (state, repo) = create_test_state().await;
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    let server = TestServer::new(app).unwrap();

    (server, repo)
}

pub async fn create_test_mapping(repo: &SqliteMappingRepository, code: &str, url: &str) {
    use url_shortener::domain::entities::NewMapping;
    use url_shortener::domain::repositories::{InsertOutcome, MappingRepository};

    let outcome = repo
        .insert(NewMapping::now(code.to_string(), url.to_string()))
        .await
        .unwrap();
    assert!(matches!(outcome, InsertOutcome::Inserted(_)));
}
