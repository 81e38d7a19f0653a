//! Recorded state: what the host last observed for each managed resource

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Address of a resource in a manifest: `type.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    /// Resource type, e.g. `gfw_role`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Local label chosen by the manifest author
    pub name: String,
}

impl Address {
    /// Create an address
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Parse `type.name`
    pub fn parse(s: &str) -> Option<Self> {
        let (type_name, name) = s.split_once('.')?;
        if type_name.is_empty() || name.is_empty() || name.contains('.') {
            return None;
        }
        Some(Self::new(type_name, name))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.name)
    }
}

/// A resource as last observed after a successful operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResource {
    #[serde(flatten)]
    pub address: Address,
    /// Remote identity
    pub id: String,
    /// Flat attribute tree returned by the last read
    pub config: Value,
}

/// All recorded resources, in the order they were first recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub resources: Vec<RecordedResource>,
}

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a recorded resource
    pub fn get(&self, address: &Address) -> Option<&RecordedResource> {
        self.resources.iter().find(|r| &r.address == address)
    }

    /// Insert or replace a recorded resource, keeping its position
    pub fn upsert(&mut self, record: RecordedResource) {
        match self.resources.iter_mut().find(|r| r.address == record.address) {
            Some(existing) => *existing = record,
            None => self.resources.push(record),
        }
    }

    /// Remove a recorded resource
    pub fn remove(&mut self, address: &Address) -> Option<RecordedResource> {
        let index = self.resources.iter().position(|r| &r.address == address)?;
        Some(self.resources.remove(index))
    }

    /// Number of recorded resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Persists state after every successful operation
pub trait StateStore {
    /// Write the full state
    fn persist(&self, state: &State) -> Result<()>;
}

/// Store that keeps nothing (for dry runs and tests)
pub struct NoStore;

impl StateStore for NoStore {
    fn persist(&self, _state: &State) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(type_name: &str, name: &str, id: &str) -> RecordedResource {
        RecordedResource {
            address: Address::new(type_name, name),
            id: id.to_string(),
            config: json!({}),
        }
    }

    #[test]
    fn test_address_parse() {
        assert_eq!(
            Address::parse("gfw_role.admin"),
            Some(Address::new("gfw_role", "admin"))
        );
        assert_eq!(Address::parse("gfw_role"), None);
        assert_eq!(Address::parse("a.b.c"), None);
        assert_eq!(Address::parse(".x"), None);
        assert_eq!(Address::new("gfw_role", "admin").to_string(), "gfw_role.admin");
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut state = State::new();
        state.upsert(record("gfw_action", "read", "1"));
        state.upsert(record("gfw_role", "admin", "2"));
        state.upsert(record("gfw_action", "read", "9"));

        assert_eq!(state.len(), 2);
        assert_eq!(state.resources[0].id, "9");
        assert_eq!(state.get(&Address::new("gfw_role", "admin")).unwrap().id, "2");
    }

    #[test]
    fn test_remove() {
        let mut state = State::new();
        state.upsert(record("gfw_action", "read", "1"));
        assert!(state.remove(&Address::new("gfw_action", "read")).is_some());
        assert!(state.remove(&Address::new("gfw_action", "read")).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_record_serialization_is_flat() {
        let value = serde_json::to_value(record("gfw_role", "admin", "2")).unwrap();
        assert_eq!(
            value,
            json!({"type": "gfw_role", "name": "admin", "id": "2", "config": {}})
        );
    }
}
