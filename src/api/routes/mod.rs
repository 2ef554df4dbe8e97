//! API route handlers.
//!
//! - `agents`: owner-scoped agent CRUD and lifecycle control

pub mod agents;

pub use agents::{
    control_agent, create_agent, delete_agent, get_agent, list_agents, monitor_agent,
    DataResponse, DeletedAgent, ListResponse,
};
