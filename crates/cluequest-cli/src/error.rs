//! Clue Quest — CLI error types.

use cluequest_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The quiz context rejected its input or could not publish.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading input or a question file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
