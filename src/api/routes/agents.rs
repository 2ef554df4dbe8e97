//! Agent management endpoints.
//!
//! Every endpoint is owner-scoped: the caller identity comes from the
//! [`CallerId`] extension set by the identity middleware.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agent::service::authenticate;
use crate::agent::{Agent, AgentError, ControlRequest, CreateAgentRequest, MonitorSnapshot};
use crate::api::middleware::CallerId;
use crate::api::ApiState;

// ============================================================================
// RESPONSE ENVELOPES
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedAgent {
    pub id: String,
}

type ApiResult<T> = Result<T, AgentError>;

fn caller_of(caller: &Option<Extension<CallerId>>) -> Option<&str> {
    caller.as_ref().map(|Extension(c)| c.as_str())
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/agents/create
///
/// Creates an inactive agent owned by the caller.
pub async fn create_agent(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
    payload: Result<Json<CreateAgentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Agent>>)> {
    let caller = authenticate(caller_of(&caller), "agent creation")?;
    let Json(request) = payload?;

    let agent = state.service.create(Some(caller), request)?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "AI agent created successfully",
            agent,
        )),
    ))
}

/// GET /api/agents/list
pub async fn list_agents(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
) -> ApiResult<Json<ListResponse<Agent>>> {
    let agents = state.service.list(caller_of(&caller))?;
    let count = agents.len();
    Ok(Json(ListResponse {
        data: agents,
        count,
    }))
}

/// GET /api/agents/:id
pub async fn get_agent(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DataResponse<Agent>>> {
    let caller = authenticate(caller_of(&caller), "agent retrieval")?;
    let Path(agent_id) = path?;

    let agent = state.service.get(Some(caller), &agent_id)?;
    Ok(Json(DataResponse::new(agent)))
}

/// POST /api/agents/:id/control
///
/// Body: `{"action": "start" | "stop" | "restart"}`. A malformed path or body
/// is rejected only after the caller is authenticated.
pub async fn control_agent(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Agent>>> {
    let caller = authenticate(caller_of(&caller), "agent control")?;
    let Path(agent_id) = path?;
    let Json(request) = payload?;

    let agent = state
        .service
        .control(Some(caller), &agent_id, &request.action)?;
    Ok(Json(DataResponse::with_message(
        format!("Agent {} action completed", request.action),
        agent,
    )))
}

/// GET /api/agents/:id/monitor
///
/// Status snapshot with placeholder metrics.
pub async fn monitor_agent(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DataResponse<MonitorSnapshot>>> {
    let caller = authenticate(caller_of(&caller), "agent monitoring")?;
    let Path(agent_id) = path?;

    let snapshot = state.service.monitor(Some(caller), &agent_id)?;
    Ok(Json(DataResponse::new(snapshot)))
}

/// DELETE /api/agents/:id
pub async fn delete_agent(
    State(state): State<Arc<ApiState>>,
    caller: Option<Extension<CallerId>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DataResponse<DeletedAgent>>> {
    let caller = authenticate(caller_of(&caller), "agent deletion")?;
    let Path(agent_id) = path?;

    let removed = state.service.delete(Some(caller), &agent_id)?;
    Ok(Json(DataResponse::with_message(
        "Agent deleted successfully",
        DeletedAgent { id: removed.id },
    )))
}
