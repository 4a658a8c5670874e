//! Application-level errors

use domain::EditError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Editor state machine error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Network or transport failure talking to a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// The collaborator rejected the request (e.g. unauthorized organization)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is worth a manual retry
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
