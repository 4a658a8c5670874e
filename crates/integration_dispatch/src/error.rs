//! Dispatch error types

use thiserror::Error;

/// Errors that can occur talking to the dispatch backend
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Connection to the dispatch backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the dispatch backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a dispatch backend response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The backend rejected the request (e.g. unauthorized organization)
    #[error("Request rejected: {0}")]
    Validation(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl DispatchError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
