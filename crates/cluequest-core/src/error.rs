//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A validation error in domain logic (e.g. an unusable question set).
    #[error("validation error: {0}")]
    Validation(String),

    /// Authored content could not be parsed.
    #[error("content error: {0}")]
    Content(String),

    /// An infrastructure error, such as a subscriber refusing events.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
