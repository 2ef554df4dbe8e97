//! REST API implementation.
//!
//! ```text
//! POST   /api/agents/create       create an agent
//! GET    /api/agents/list         list the caller's agents
//! GET    /api/agents/:id          agent details
//! POST   /api/agents/:id/control  start / stop / restart
//! GET    /api/agents/:id/monitor  status snapshot
//! DELETE /api/agents/:id          delete an agent
//! ```

pub mod errors;
pub mod middleware;
pub mod routes;
pub mod state;

pub use errors::ErrorBody;
pub use middleware::{CallerId, DEFAULT_IDENTITY_HEADER};
pub use state::ApiState;

use axum::{
    http::HeaderName,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::agent::AgentService;

/// Build the agent router. `identity_header` names the request header that
/// carries the authenticated user id.
pub fn agent_router(service: Arc<AgentService>, identity_header: HeaderName) -> Router {
    let state = Arc::new(ApiState::new(service));

    Router::new()
        .route("/api/agents/create", post(routes::create_agent))
        .route("/api/agents/list", get(routes::list_agents))
        .route(
            "/api/agents/:id",
            get(routes::get_agent).delete(routes::delete_agent),
        )
        .route("/api/agents/:id/control", post(routes::control_agent))
        .route("/api/agents/:id/monitor", get(routes::monitor_agent))
        .layer(from_fn_with_state(identity_header, middleware::resolve_caller))
        .with_state(state)
}
