//! Domain-level errors

use thiserror::Error;

/// Errors raised by the location editor state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The requested transition is not valid from the current state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// Name of the current state
        state: &'static str,
        /// The attempted operation
        action: &'static str,
    },

    /// Confirm was requested without a pending candidate
    #[error("No candidate selected")]
    NothingSelected,
}

impl EditError {
    /// Create an invalid-transition error
    pub const fn invalid(state: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition { state, action }
    }
}
