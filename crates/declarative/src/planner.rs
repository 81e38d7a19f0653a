//! Change planner - compares desired configuration against recorded state

use crate::diff::{FieldChange, changed_fields};
use crate::reference::{references, resolve};
use crate::resource::Registry;
use crate::state::{Address, State};
use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A resource as declared in a manifest
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredResource {
    pub address: Address,
    /// Flat attribute tree, possibly containing references
    pub config: Value,
}

/// What will happen to one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    NoChange,
}

impl Action {
    /// Symbol used when displaying a plan
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Update => "~",
            Self::Delete => "-",
            Self::NoChange => " ",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoChange => "no change",
        };
        f.write_str(label)
    }
}

/// One planned change
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub address: Address,
    pub action: Action,
    /// Desired configuration (absent for deletes)
    pub desired: Option<Value>,
    /// Attributes that differ from recorded state (updates only)
    pub changes: Vec<FieldChange>,
}

/// An ordered set of changes
///
/// Creates, updates and no-ops follow manifest order; deletes come last in
/// reverse recorded order so dependents go before their dependencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub changes: Vec<PlannedChange>,
}

impl Plan {
    /// Build a plan from manifest entries and recorded state
    ///
    /// # Errors
    ///
    /// Fails on unknown resource types, duplicate addresses, references to
    /// resources that are neither declared earlier nor recorded, and
    /// configurations that do not parse.
    pub fn build(desired: &[DesiredResource], state: &State, registry: &Registry) -> Result<Self> {
        let mut changes = Vec::with_capacity(desired.len());
        let mut seen: HashSet<&Address> = HashSet::new();

        for resource in desired {
            let handler = registry.require(&resource.address.type_name)?;
            if !seen.insert(&resource.address) {
                bail!("duplicate resource {}", resource.address);
            }
            for target in references(&resource.config) {
                if !seen.contains(&target) && state.get(&target).is_none() {
                    bail!(
                        "{} references {target}, which is not declared before it",
                        resource.address
                    );
                }
            }

            let change = match state.get(&resource.address) {
                None => {
                    // Referenced ids may not exist yet; validate what can be parsed.
                    if let Ok(resolved) = resolve(&resource.config, state) {
                        handler.normalize(&resolved).map_err(|e| {
                            e.context(format!("invalid configuration for {}", resource.address))
                        })?;
                    }
                    PlannedChange {
                        address: resource.address.clone(),
                        action: Action::Create,
                        desired: Some(resource.config.clone()),
                        changes: Vec::new(),
                    }
                }
                Some(record) => {
                    let field_changes = match resolve(&resource.config, state) {
                        Ok(resolved) => {
                            let normalized = handler.normalize(&resolved).map_err(|e| {
                                e.context(format!("invalid configuration for {}", resource.address))
                            })?;
                            changed_fields(&record.config, &normalized, handler.computed())
                        }
                        Err(unresolved) => vec![FieldChange {
                            field: unresolved.0.to_string(),
                            from: Value::Null,
                            to: Value::String("(known after apply)".to_string()),
                        }],
                    };
                    let action = if field_changes.is_empty() {
                        Action::NoChange
                    } else {
                        Action::Update
                    };
                    PlannedChange {
                        address: resource.address.clone(),
                        action,
                        desired: Some(resource.config.clone()),
                        changes: field_changes,
                    }
                }
            };
            changes.push(change);
        }

        for record in state.resources.iter().rev() {
            if !seen.contains(&record.address) {
                registry.require(&record.address.type_name)?;
                changes.push(PlannedChange {
                    address: record.address.clone(),
                    action: Action::Delete,
                    desired: None,
                    changes: Vec::new(),
                });
            }
        }

        Ok(Self { changes })
    }

    /// Plan that deletes every recorded resource, newest first
    pub fn destroy(state: &State) -> Self {
        let changes = state
            .resources
            .iter()
            .rev()
            .map(|record| PlannedChange {
                address: record.address.clone(),
                action: Action::Delete,
                desired: None,
                changes: Vec::new(),
            })
            .collect();
        Self { changes }
    }

    /// Number of changes with the given action
    pub fn count(&self, action: Action) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    /// Check if nothing needs to change
    pub fn is_empty(&self) -> bool {
        self.changes.iter().all(|c| c.action == Action::NoChange)
    }

    /// Keep only changes for one type (`type`) or one resource (`type.name`)
    pub fn filter_by_target(self, target: Option<&str>) -> Self {
        let Some(target) = target else {
            return self;
        };
        let changes = self
            .changes
            .into_iter()
            .filter(|c| match Address::parse(target) {
                Some(address) => c.address == address,
                None => c.address.type_name == target,
            })
            .collect();
        Self { changes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::Notes;
    use crate::state::RecordedResource;
    use serde_json::json;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(Notes::default());
        registry
    }

    fn desired(name: &str, config: Value) -> DesiredResource {
        DesiredResource {
            address: Address::new("note", name),
            config,
        }
    }

    fn recorded(name: &str, id: &str, config: Value) -> RecordedResource {
        RecordedResource {
            address: Address::new("note", name),
            id: id.to_string(),
            config,
        }
    }

    #[test]
    fn test_create_update_delete_no_change() {
        let mut state = State::new();
        state.upsert(recorded(
            "same",
            "1",
            json!({"text": "same", "priority": 1, "created_at": "t"}),
        ));
        state.upsert(recorded(
            "changed",
            "2",
            json!({"text": "old", "priority": 1, "created_at": "t"}),
        ));
        state.upsert(recorded(
            "gone",
            "3",
            json!({"text": "gone", "priority": 1, "created_at": "t"}),
        ));

        let manifest = vec![
            desired("same", json!({"text": "same"})),
            desired("changed", json!({"text": "new"})),
            desired("fresh", json!({"text": "fresh"})),
        ];

        let plan = Plan::build(&manifest, &state, &registry()).unwrap();
        let actions: Vec<_> = plan.changes.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![Action::NoChange, Action::Update, Action::Create, Action::Delete]
        );
        assert_eq!(plan.changes[1].changes[0].field, "text");
        assert_eq!(plan.count(Action::Delete), 1);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_unknown_type_fails() {
        let manifest = vec![DesiredResource {
            address: Address::new("widget", "a"),
            config: json!({}),
        }];
        assert!(Plan::build(&manifest, &State::new(), &registry()).is_err());
    }

    #[test]
    fn test_duplicate_address_fails() {
        let manifest = vec![
            desired("a", json!({"text": "x"})),
            desired("a", json!({"text": "y"})),
        ];
        let err = Plan::build(&manifest, &State::new(), &registry()).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_reference_must_be_declared_first() {
        let manifest = vec![desired("b", json!({"text": "${note.a.id}"}))];
        let err = Plan::build(&manifest, &State::new(), &registry()).unwrap_err();
        assert!(err.to_string().contains("note.a"));

        let manifest = vec![
            desired("a", json!({"text": "x"})),
            desired("b", json!({"text": "${note.a.id}"})),
        ];
        let plan = Plan::build(&manifest, &State::new(), &registry()).unwrap();
        assert_eq!(plan.count(Action::Create), 2);
    }

    #[test]
    fn test_invalid_config_fails_plan() {
        let manifest = vec![desired("a", json!({"text": "x", "bogus": true}))];
        assert!(Plan::build(&manifest, &State::new(), &registry()).is_err());
    }

    #[test]
    fn test_destroy_reverses_order() {
        let mut state = State::new();
        state.upsert(recorded("a", "1", json!({})));
        state.upsert(recorded("b", "2", json!({})));
        let plan = Plan::destroy(&state);
        assert_eq!(plan.changes[0].address.name, "b");
        assert_eq!(plan.count(Action::Delete), 2);
    }

    #[test]
    fn test_filter_by_target() {
        let manifest = vec![desired("a", json!({"text": "x"})), desired("b", json!({"text": "y"}))];
        let plan = Plan::build(&manifest, &State::new(), &registry()).unwrap();
        assert_eq!(plan.clone().filter_by_target(Some("note.b")).changes.len(), 1);
        assert_eq!(plan.clone().filter_by_target(Some("note")).changes.len(), 2);
        assert_eq!(plan.filter_by_target(None).changes.len(), 2);
    }
}
