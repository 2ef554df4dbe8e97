//! Agent record and request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::AgentError;

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Inactive,
    Active,
    /// Declared for forward compatibility; no control action leads here.
    Training,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Inactive => "inactive",
            AgentStatus::Active => "active",
            AgentStatus::Training => "training",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model configuration attached to an agent. Stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// e.g. "neural_net", "reinforcement"
    pub model_type: String,
    pub learning_rate: f64,
    /// e.g. "web3_solana", "local_sim"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// A managed agent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    pub status: AgentStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub config: AgentConfig,
}

impl Agent {
    /// Build a fresh record. Status always starts as `Inactive`.
    pub fn new(id: String, owner_id: String, spec: NewAgent) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: spec.name,
            description: spec.description,
            owner_id,
            status: AgentStatus::Inactive,
            created: now,
            updated: now,
            config: spec.config,
        }
    }

    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.owner_id == caller
    }
}

/// Validated creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub description: Option<String>,
    pub config: AgentConfig,
}

// ==================== Request Types ====================

/// Body of `POST /api/agents/create`.
///
/// Every field is optional at the serde level so that missing fields surface
/// as validation errors with a readable message. Server-owned fields (`id`,
/// `owner_id`, `status`, timestamps) are not part of the payload and are
/// silently dropped if a client sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAgentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub config: Option<AgentConfigRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfigRequest {
    pub model_type: Option<String>,
    pub learning_rate: Option<f64>,
    pub environment: Option<String>,
}

impl CreateAgentRequest {
    /// Check required fields and produce a [`NewAgent`].
    pub fn validate(self) -> Result<NewAgent, AgentError> {
        let mut missing = Vec::new();

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if name.is_none() {
            missing.push("name");
        }

        let (model_type, learning_rate, environment) = match self.config {
            Some(config) => {
                let model_type = config
                    .model_type
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty());
                if model_type.is_none() {
                    missing.push("config.model_type");
                }
                if config.learning_rate.is_none() {
                    missing.push("config.learning_rate");
                }
                (model_type, config.learning_rate, config.environment)
            }
            None => {
                missing.push("config");
                (None, None, None)
            }
        };

        match (name, model_type, learning_rate) {
            (Some(name), Some(model_type), Some(learning_rate)) => Ok(NewAgent {
                name,
                description: self.description,
                config: AgentConfig {
                    model_type,
                    learning_rate,
                    environment,
                },
            }),
            _ => Err(AgentError::InvalidInput(format!(
                "missing required field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Body of `POST /api/agents/:id/control`.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlRequest {
    pub action: String,
}

// ==================== Monitoring ====================

/// Placeholder metrics. No metric source exists, so the values are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub tasks_completed: u64,
    pub error_rate: f64,
    pub performance: String,
}

impl Default for AgentMetrics {
    fn default() -> Self {
        Self {
            tasks_completed: 0,
            error_rate: 0.0,
            performance: "N/A".to_string(),
        }
    }
}

/// Derived status view returned by the monitor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub status: AgentStatus,
    pub last_updated: DateTime<Utc>,
    /// Human readable elapsed time since creation, e.g. `1h2m3s`
    pub uptime: String,
    pub uptime_seconds: i64,
    pub metrics: AgentMetrics,
}

impl MonitorSnapshot {
    pub fn of(agent: &Agent, now: DateTime<Utc>) -> Self {
        let elapsed = (now - agent.created).num_seconds().max(0);
        Self {
            status: agent.status,
            last_updated: agent.updated,
            uptime: format_uptime(elapsed),
            uptime_seconds: elapsed,
            metrics: AgentMetrics::default(),
        }
    }
}

/// Format whole seconds as `XhYmZs`, dropping leading zero units.
pub fn format_uptime(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
