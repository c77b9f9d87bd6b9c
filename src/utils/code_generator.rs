//! Short code generation and shape validation.
//!
//! Codes are [`CODE_LENGTH`] symbols drawn uniformly from `[A-Za-z0-9]`,
//! giving 62^6 (about 56.8 billion) possible codes.

use rand::distr::{Alphanumeric, SampleString};

/// Number of symbols in a short code.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// Each symbol is drawn independently and uniformly from the 62 ASCII
/// letters and digits using the thread-local CSPRNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), CODE_LENGTH)
}

/// Returns true if `code` has the shape of a short code.
///
/// Purely syntactic: says nothing about whether the code exists. Callers use it
/// to reject malformed input before touching the store.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_short_code("aB3xY9"));
/// assert!(!is_valid_short_code("short"));      // 5 characters
/// assert!(!is_valid_short_code("has space"));  // whitespace
/// ```
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
