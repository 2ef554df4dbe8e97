//! Shared state handed to every API handler.

use std::sync::Arc;

use crate::agent::AgentService;

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<AgentService>,
}

impl ApiState {
    pub fn new(service: Arc<AgentService>) -> Self {
        Self { service }
    }
}
