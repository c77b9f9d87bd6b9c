//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code generation and shape validation
//! - [`url_validator`] - URL normalization and validation

pub mod code_generator;
pub mod url_validator;
