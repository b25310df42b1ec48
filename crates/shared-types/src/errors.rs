//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised while turning raw input into a [`crate::ConfigValue`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The byte sequence is not valid UTF-8.
    #[error("Invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    /// The text is not valid JSON.
    #[error("Malformed JSON: {0}")]
    Malformed(String),

    /// The JSON is valid but is not an object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Errors raised while validating a bus address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The address is the empty string.
    #[error("Bus address must not be empty")]
    Empty,
}
