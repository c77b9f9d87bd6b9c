//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code to URL association
//! - [`NewMapping`] - Values needed to insert a new mapping

pub mod url_mapping;

pub use url_mapping::{NewMapping, UrlMapping};
