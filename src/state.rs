//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::SqliteMappingRepository;

/// Link service wired to the production store.
pub type AppLinkService = LinkService<SqliteMappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    /// Public prefix of short URLs, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>, base_url: impl Into<String>) -> Self {
        Self {
            link_service,
            base_url: base_url.into(),
        }
    }
}
