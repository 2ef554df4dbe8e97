//! In-memory agent store
//!
//! One `RwLock` guards the whole map. Mutating accessors take the write lock
//! for the entire check-and-mutate closure, so callers can run ownership and
//! state checks atomically with the change they guard.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::StoreError;
use crate::agent::Agent;

/// Outcome of a guarded removal.
#[derive(Debug)]
pub enum Removal<E> {
    Removed(Agent),
    Rejected(E),
    Missing,
}

/// Process-wide map from agent id to record. Not ownership-aware.
#[derive(Debug, Default)]
pub struct AgentStore {
    agents: RwLock<HashMap<String, Agent>>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record. An id that is already present is rejected and
    /// the existing record is left untouched.
    pub fn insert(&self, agent: Agent) -> Result<(), StoreError> {
        if agent.id.is_empty() || agent.owner_id.is_empty() {
            return Err(StoreError::IncompleteRecord);
        }

        let mut agents = self.agents.write();
        if agents.contains_key(&agent.id) {
            return Err(StoreError::DuplicateId(agent.id));
        }
        debug!(agent_id = %agent.id, "inserting agent record");
        agents.insert(agent.id.clone(), agent);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Agent> {
        self.agents.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.read().contains_key(id)
    }

    /// Run `f` against the record under the write lock.
    ///
    /// Returns `None` when the id is absent. The closure decides whether
    /// to mutate; an `Err` from it must leave the record as it found it.
    pub fn modify<T, F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Agent) -> T,
    {
        let mut agents = self.agents.write();
        agents.get_mut(id).map(f)
    }

    /// Remove the record only if `check` accepts it. Check and removal happen
    /// under one write lock.
    pub fn remove_if<E, F>(&self, id: &str, check: F) -> Removal<E>
    where
        F: FnOnce(&Agent) -> Result<(), E>,
    {
        let mut agents = self.agents.write();
        let verdict = match agents.get(id) {
            Some(agent) => check(agent),
            None => return Removal::Missing,
        };
        match verdict {
            Ok(()) => match agents.remove(id) {
                Some(agent) => Removal::Removed(agent),
                None => Removal::Missing,
            },
            Err(e) => Removal::Rejected(e),
        }
    }

    /// Consistent snapshot of every record matching `filter`.
    pub fn snapshot<F>(&self, filter: F) -> Vec<Agent>
    where
        F: Fn(&Agent) -> bool,
    {
        self.agents
            .read()
            .values()
            .filter(|a| filter(a))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentConfig, AgentStatus, NewAgent};
    use std::sync::Arc;

    fn agent(id: &str, owner: &str) -> Agent {
        Agent::new(
            id.to_string(),
            owner.to_string(),
            NewAgent {
                name: format!("agent-{}", id),
                description: None,
                config: AgentConfig {
                    model_type: "neural_net".to_string(),
                    learning_rate: 0.01,
                    environment: None,
                },
            },
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = AgentStore::new();
        store.insert(agent("a1", "U1")).unwrap();

        let fetched = store.get("a1").unwrap();
        assert_eq!(fetched.owner_id, "U1");
        assert!(store.contains("a1"));
        assert_eq!(store.len(), 1);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let store = AgentStore::new();
        store.insert(agent("a1", "U1")).unwrap();

        let err = store.insert(agent("a1", "U2")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a1".to_string()));
        assert_eq!(store.get("a1").unwrap().owner_id, "U1");
    }

    #[test]
    fn test_insert_incomplete_record_rejected() {
        let store = AgentStore::new();
        assert_eq!(
            store.insert(agent("", "U1")),
            Err(StoreError::IncompleteRecord)
        );
        assert_eq!(
            store.insert(agent("a1", "")),
            Err(StoreError::IncompleteRecord)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_modify_applies_closure() {
        let store = AgentStore::new();
        store.insert(agent("a1", "U1")).unwrap();

        let status = store.modify("a1", |a| {
            a.status = AgentStatus::Active;
            a.status
        });
        assert_eq!(status, Some(AgentStatus::Active));
        assert_eq!(store.get("a1").unwrap().status, AgentStatus::Active);

        assert!(store.modify("missing", |_| ()).is_none());
    }

    #[test]
    fn test_remove_if() {
        let store = AgentStore::new();
        store.insert(agent("a1", "U1")).unwrap();

        let rejected = store.remove_if("a1", |a| {
            if a.owner_id == "U2" {
                Ok(())
            } else {
                Err("not owner")
            }
        });
        assert!(matches!(rejected, Removal::Rejected("not owner")));
        assert!(store.contains("a1"));

        let removed = store.remove_if::<(), _>("a1", |_| Ok(()));
        assert!(matches!(removed, Removal::Removed(ref a) if a.id == "a1"));
        assert!(!store.contains("a1"));

        let missing = store.remove_if::<(), _>("a1", |_| Ok(()));
        assert!(matches!(missing, Removal::Missing));
    }

    #[test]
    fn test_snapshot_filters() {
        let store = AgentStore::new();
        store.insert(agent("a1", "U1")).unwrap();
        store.insert(agent("a2", "U2")).unwrap();
        store.insert(agent("a3", "U1")).unwrap();

        let mine = store.snapshot(|a| a.owner_id == "U1");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|a| a.owner_id == "U1"));
        assert_eq!(store.snapshot(|_| true).len(), 3);
    }

    #[test]
    fn test_concurrent_inserts() {
        let store = Arc::new(AgentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store
                            .insert(agent(&format!("{}-{}", t, i), "U1"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
