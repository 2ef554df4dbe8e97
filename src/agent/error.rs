use thiserror::Error;

use super::id::IdError;
use crate::storage::StoreError;

/// Errors surfaced by agent lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("Unauthorized access")]
    Unauthenticated,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Agent not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// The action is a no-op in the current state (e.g. start when active)
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgentError {
    /// Stable machine-readable code for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            AgentError::Unauthenticated => "UNAUTHORIZED",
            AgentError::InvalidInput(_) => "VALIDATION_ERROR",
            AgentError::NotFound(_) => "NOT_FOUND",
            AgentError::Forbidden(_) => "FORBIDDEN",
            AgentError::Conflict(_) => "CONFLICT",
            AgentError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// Source details are logged at the failure site, never sent to clients.
impl From<IdError> for AgentError {
    fn from(_: IdError) -> Self {
        AgentError::Internal("Failed to generate agent ID".to_string())
    }
}

impl From<StoreError> for AgentError {
    fn from(_: StoreError) -> Self {
        AgentError::Internal("Failed to store agent".to_string())
    }
}
