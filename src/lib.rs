//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! Clients submit a long URL and receive a 6-character alphanumeric code;
//! visiting the code redirects to the original URL and counts the visit; a
//! stats endpoint reports the mapping and its click count.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The url mapping entity and the repository trait
//! - **Application Layer** ([`application`]) - Validation, code allocation, visit counting
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Guarantees
//!
//! - No two mappings share a short code, even under concurrent creates
//! - Code allocation gives up after a fixed number of collisions
//! - Concurrent visits are each counted exactly once
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://url_shortener.db"  # Optional
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{NewMapping, UrlMapping};
    pub use crate::domain::repositories::{InsertOutcome, MappingRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SqliteMappingRepository;
    pub use crate::state::AppState;
}
