//! Agent lifecycle service
//!
//! Every operation checks, in order: caller identity present, agent id
//! present, record exists, caller owns it, then any action-specific rule.
//! An existing agent owned by someone else yields `Forbidden`, not
//! `NotFound`, which reveals that the id exists.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::error::AgentError;
use super::id::{IdGenerator, RandomIdGenerator};
use super::lifecycle::ControlAction;
use super::types::{Agent, CreateAgentRequest, MonitorSnapshot};
use crate::storage::{AgentStore, Removal};

/// Create, read, control and delete agents on behalf of authenticated callers.
pub struct AgentService {
    store: Arc<AgentStore>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for AgentService {
    fn default() -> Self {
        Self::new(Arc::new(AgentStore::new()))
    }
}

impl AgentService {
    pub fn new(store: Arc<AgentStore>) -> Self {
        Self::with_id_generator(store, Arc::new(RandomIdGenerator))
    }

    pub fn with_id_generator(store: Arc<AgentStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &Arc<AgentStore> {
        &self.store
    }

    /// Create an agent owned by `caller`. The new agent is always inactive.
    pub fn create(
        &self,
        caller: Option<&str>,
        request: CreateAgentRequest,
    ) -> Result<Agent, AgentError> {
        let caller = authenticate(caller, "agent creation")?;

        let spec = request.validate().map_err(|e| {
            error!(user_id = %caller, error = %e, "Invalid input for agent creation");
            e
        })?;

        let id = self.ids.generate().map_err(|e| {
            error!(error = %e, "Failed to generate agent ID");
            AgentError::from(e)
        })?;

        let agent = Agent::new(id, caller.to_string(), spec);
        self.store.insert(agent.clone()).map_err(|e| {
            error!(agent_id = %agent.id, error = %e, "Failed to store agent");
            AgentError::from(e)
        })?;

        info!(agent_id = %agent.id, owner_id = %caller, "AI agent created successfully");
        Ok(agent)
    }

    pub fn get(&self, caller: Option<&str>, agent_id: &str) -> Result<Agent, AgentError> {
        let caller = authenticate(caller, "agent retrieval")?;
        let agent_id = require_agent_id(agent_id)?;

        let agent = self.store.get(agent_id).ok_or_else(|| {
            warn!(agent_id = %agent_id, "Agent not found");
            not_found(agent_id)
        })?;
        check_owner(&agent, caller, "access")?;

        info!(agent_id = %agent_id, user_id = %caller, "Agent details retrieved");
        Ok(agent)
    }

    /// All agents owned by `caller`, oldest first.
    pub fn list(&self, caller: Option<&str>) -> Result<Vec<Agent>, AgentError> {
        let caller = authenticate(caller, "agent listing")?;

        let mut agents = self.store.snapshot(|a| a.is_owned_by(caller));
        agents.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));

        info!(user_id = %caller, count = agents.len(), "Agent list retrieved for user");
        Ok(agents)
    }

    /// Apply a control action. The action string is parsed only after the
    /// existence and ownership checks pass; an invalid action or a conflict
    /// leaves the record untouched.
    pub fn control(
        &self,
        caller: Option<&str>,
        agent_id: &str,
        action: &str,
    ) -> Result<Agent, AgentError> {
        let caller = authenticate(caller, "agent control")?;
        let agent_id = require_agent_id(agent_id)?;

        let outcome = self.store.modify(agent_id, |agent| {
            check_owner(agent, caller, "control")?;

            let action: ControlAction = action.parse().map_err(|e| {
                warn!(agent_id = %agent_id, action = %action, "Invalid control action");
                e
            })?;
            let next = action.apply(agent.status).map_err(|e| {
                warn!(agent_id = %agent_id, action = %action, status = %agent.status, "Control action rejected");
                e
            })?;

            agent.status = next;
            agent.updated = Utc::now();
            Ok::<_, AgentError>((action, agent.clone()))
        });

        match outcome {
            Some(Ok((action, agent))) => {
                info!(agent_id = %agent_id, action = %action, status = %agent.status, "Agent control action executed");
                Ok(agent)
            }
            Some(Err(e)) => Err(e),
            None => {
                warn!(agent_id = %agent_id, "Agent not found for control");
                Err(not_found(agent_id))
            }
        }
    }

    pub fn monitor(
        &self,
        caller: Option<&str>,
        agent_id: &str,
    ) -> Result<MonitorSnapshot, AgentError> {
        let caller = authenticate(caller, "agent monitoring")?;
        let agent_id = require_agent_id(agent_id)?;

        let agent = self.store.get(agent_id).ok_or_else(|| {
            warn!(agent_id = %agent_id, "Agent not found for monitoring");
            not_found(agent_id)
        })?;
        check_owner(&agent, caller, "monitor")?;

        info!(agent_id = %agent_id, user_id = %caller, "Agent monitoring data retrieved");
        Ok(MonitorSnapshot::of(&agent, Utc::now()))
    }

    /// Remove an agent. Returns the removed record.
    pub fn delete(&self, caller: Option<&str>, agent_id: &str) -> Result<Agent, AgentError> {
        let caller = authenticate(caller, "agent deletion")?;
        let agent_id = require_agent_id(agent_id)?;

        match self
            .store
            .remove_if(agent_id, |agent| check_owner(agent, caller, "delete"))
        {
            Removal::Removed(agent) => {
                info!(agent_id = %agent_id, user_id = %caller, "Agent deleted successfully");
                Ok(agent)
            }
            Removal::Rejected(e) => Err(e),
            Removal::Missing => {
                warn!(agent_id = %agent_id, "Agent not found for deletion");
                Err(not_found(agent_id))
            }
        }
    }
}

/// Resolve the caller identity or fail with `Unauthenticated`.
pub fn authenticate<'a>(caller: Option<&'a str>, operation: &str) -> Result<&'a str, AgentError> {
    match caller.map(str::trim) {
        Some(c) if !c.is_empty() => Ok(c),
        _ => {
            error!("No user ID found in context for {}", operation);
            Err(AgentError::Unauthenticated)
        }
    }
}

fn require_agent_id(agent_id: &str) -> Result<&str, AgentError> {
    if agent_id.is_empty() {
        error!("Agent ID not provided in request");
        return Err(AgentError::InvalidInput("Agent ID is required".to_string()));
    }
    Ok(agent_id)
}

fn check_owner(agent: &Agent, caller: &str, verb: &str) -> Result<(), AgentError> {
    if agent.is_owned_by(caller) {
        return Ok(());
    }
    warn!(agent_id = %agent.id, user_id = %caller, "Unauthorized attempt to {} agent", verb);
    Err(AgentError::Forbidden(format!(
        "You do not have permission to {} this agent",
        verb
    )))
}

fn not_found(agent_id: &str) -> AgentError {
    AgentError::NotFound(agent_id.to_string())
}
