//! Agent Lifecycle Service
//!
//! Owner-scoped CRUD and lifecycle control for "AI agent" records held in an
//! in-memory store, served over HTTP.
//!
//! ## Module Structure
//!
//! - `agent/`: Agent types, status state machine, id generation, service
//! - `storage/`: Lock-guarded in-memory agent store
//! - `api/`: REST API (routes, identity middleware, error mapping)
//! - `config`: Server configuration
//! - `server`: HTTP server assembly

pub mod agent;
pub mod api;
pub mod config;
pub mod server;
pub mod storage;

pub use agent::{
    Agent, AgentConfig, AgentError, AgentService, AgentStatus, ControlAction,
    CreateAgentRequest, IdGenerator, MonitorSnapshot, RandomIdGenerator,
};
pub use api::{agent_router, CallerId};
pub use config::{ConfigError, ServerConfig};
pub use server::AgentServer;
pub use storage::{AgentStore, StoreError};
