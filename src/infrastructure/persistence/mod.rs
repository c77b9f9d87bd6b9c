//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`SqliteMappingRepository`] - Url mapping storage, lookup and click counting

pub mod sqlite_mapping_repository;

pub use sqlite_mapping_repository::SqliteMappingRepository;
