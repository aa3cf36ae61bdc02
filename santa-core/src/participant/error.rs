//! Error types for participant validation and roster operations.
//!
//! These are raised before anything reaches the draw engine.

use thiserror::Error;

/// Error type for participant and roster operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name was empty or only whitespace.
    #[error("Please enter a name")]
    EmptyName,

    /// Phone number is not exactly ten digits.
    #[error("Please enter a valid phone number: {0}")]
    InvalidPhone(String),

    /// A participant with this phone number is already on the list.
    #[error("Phone number already added: {0}")]
    DuplicatePhone(String),

    /// None of a contact's phone numbers could be normalized.
    #[error("Contact has no usable phone number: {0}")]
    NoUsablePhone(String),

    /// No participant with this phone number or index.
    #[error("Participant not found: {0}")]
    NotFound(String),
}

/// Result type alias for participant operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
