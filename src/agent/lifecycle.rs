//! Status state machine driven by control actions.
//!
//! ```text
//!            start / restart
//!  inactive ─────────────────> active
//!     ^                          │
//!     └──────────── stop ────────┘
//!
//!  training ── stop ──> inactive
//!  training ── start / restart ──> active
//! ```
//!
//! `start` on an active agent and `stop` on an inactive one are conflicts.
//! `restart` always lands on `active`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AgentError;
use super::types::AgentStatus;

/// Control actions accepted by `POST /api/agents/:id/control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
    Restart,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop => "stop",
            ControlAction::Restart => "restart",
        }
    }

    /// Compute the status that results from applying this action.
    pub fn apply(&self, current: AgentStatus) -> Result<AgentStatus, AgentError> {
        match (self, current) {
            (ControlAction::Start, AgentStatus::Active) => {
                Err(AgentError::Conflict("Agent is already active".to_string()))
            }
            (ControlAction::Start, _) => Ok(AgentStatus::Active),
            (ControlAction::Stop, AgentStatus::Inactive) => {
                Err(AgentError::Conflict("Agent is already inactive".to_string()))
            }
            (ControlAction::Stop, _) => Ok(AgentStatus::Inactive),
            (ControlAction::Restart, _) => Ok(AgentStatus::Active),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ControlAction::Start),
            "stop" => Ok(ControlAction::Stop),
            "restart" => Ok(ControlAction::Restart),
            _ => Err(AgentError::InvalidInput(
                "Invalid control action. Use 'start', 'stop', or 'restart'".to_string(),
            )),
        }
    }
}
