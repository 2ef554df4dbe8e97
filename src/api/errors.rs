//! Mapping of [`AgentError`] onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::agent::AgentError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl AgentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgentError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AgentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AgentError::NotFound(_) => StatusCode::NOT_FOUND,
            AgentError::Forbidden(_) => StatusCode::FORBIDDEN,
            // Already-in-state is reported as a client error, not 409
            AgentError::Conflict(_) => StatusCode::BAD_REQUEST,
            AgentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AgentError::Unauthenticated => "Unauthorized access".to_string(),
            AgentError::NotFound(_) => "Agent not found".to_string(),
            AgentError::InvalidInput(msg)
            | AgentError::Forbidden(msg)
            | AgentError::Conflict(msg)
            | AgentError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
            code: self.code().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AgentError {
    fn from(rejection: JsonRejection) -> Self {
        AgentError::InvalidInput(format!("Invalid input data: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AgentError {
    fn from(rejection: PathRejection) -> Self {
        AgentError::InvalidInput(format!("Invalid agent ID: {}", rejection.body_text()))
    }
}
