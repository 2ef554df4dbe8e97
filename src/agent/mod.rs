//! Agent management: record types, lifecycle state machine, id generation
//! and the ownership-checked service that ties them to the store.

pub mod error;
pub mod id;
pub mod lifecycle;
pub mod service;
pub mod types;

pub use error::AgentError;
pub use id::{IdError, IdGenerator, RandomIdGenerator};
pub use lifecycle::ControlAction;
pub use service::AgentService;
pub use types::{
    Agent, AgentConfig, AgentConfigRequest, AgentMetrics, AgentStatus, ControlRequest,
    CreateAgentRequest, MonitorSnapshot, NewAgent,
};
