//! Agent persistence layer.

pub mod memory;

pub use memory::{AgentStore, Removal};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Agent id already exists: {0}")]
    DuplicateId(String),
    #[error("Agent record is missing an id or owner")]
    IncompleteRecord,
}
