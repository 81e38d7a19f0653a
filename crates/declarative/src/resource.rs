//! Resource trait for declarative state management
//!
//! A Resource is a remote entity type with four lifecycle operations. The
//! host works with type-erased [`DynResource`] handles that exchange flat
//! attribute trees as JSON and report failures as diagnostics.

use crate::types::Diagnostic;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of a successful create, read or update
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<C> {
    /// Remote identity
    pub id: String,
    /// Flat attribute tree as read back from the remote system
    pub config: C,
    /// Warnings worth surfacing to the user
    pub diagnostics: Vec<Diagnostic>,
}

impl<C> Applied<C> {
    /// Create an outcome without diagnostics
    pub fn new(id: impl Into<String>, config: C) -> Self {
        Self {
            id: id.into(),
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Attach a diagnostic
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Core trait for managed resource types
///
/// Implementations compose the API client, the schema translator and (for
/// association types) the membership reconciler.
///
/// # Example
///
/// ```ignore
/// use declarative::{Applied, Resource};
///
/// struct Tag;
///
/// impl Resource for Tag {
///     type Config = TagConfig;
///
///     fn type_name(&self) -> &'static str { "tag" }
///
///     fn create(&self, config: &TagConfig) -> anyhow::Result<Applied<TagConfig>> {
///         let id = api::create_tag(&config.name)?;
///         self.read(&id)
///     }
///     // read, update, delete ...
/// }
/// ```
pub trait Resource: Send + Sync {
    /// Flat attribute tree accepted and returned by this type
    type Config: Serialize + DeserializeOwned + Send;

    /// Resource type name, e.g. `gfw_dataset`
    fn type_name(&self) -> &'static str;

    /// Attributes assigned by the server, never compared when planning
    fn computed_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check a configuration before any remote call
    fn validate(&self, _config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Create the entity (or adopt an existing one) and read it back
    fn create(&self, config: &Self::Config) -> Result<Applied<Self::Config>>;

    /// Read the entity by identity
    fn read(&self, id: &str) -> Result<Applied<Self::Config>>;

    /// Converge the entity from `prior` to `desired` and read it back
    fn update(
        &self,
        id: &str,
        prior: &Self::Config,
        desired: &Self::Config,
    ) -> Result<Applied<Self::Config>>;

    /// Delete the entity
    fn delete(&self, id: &str, prior: &Self::Config) -> Result<()>;
}

/// Result of a type-erased operation
///
/// `id` and `state` are set only when the operation succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub id: Option<String>,
    pub state: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Response {
    /// A failed response carrying one error diagnostic
    pub fn failure(err: &anyhow::Error) -> Self {
        Self {
            diagnostics: vec![Diagnostic::from_error(err)],
            ..Default::default()
        }
    }

    /// Check if any diagnostic is an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// First error diagnostic, if any
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_error())
    }

    fn from_applied<C: Serialize>(result: Result<Applied<C>>) -> Self {
        let applied = match result {
            Ok(applied) => applied,
            Err(err) => return Self::failure(&err),
        };
        match serde_json::to_value(&applied.config) {
            Ok(state) => Self {
                id: Some(applied.id),
                state: Some(state),
                diagnostics: applied.diagnostics,
            },
            Err(err) => Self::failure(&anyhow::Error::new(err).context("failed to encode state")),
        }
    }
}

/// Type-erased resource used by the host runtime
pub trait DynResource: Send + Sync {
    /// Resource type name
    fn type_name(&self) -> &'static str;

    /// Attributes assigned by the server
    fn computed(&self) -> &'static [&'static str];

    /// Parse, validate and re-encode a configuration, applying defaults
    fn normalize(&self, config: &Value) -> Result<Value>;

    /// Type-erased create
    fn create_value(&self, config: &Value) -> Response;

    /// Type-erased read
    fn read_value(&self, id: &str) -> Response;

    /// Type-erased update
    fn update_value(&self, id: &str, prior: &Value, desired: &Value) -> Response;

    /// Type-erased delete
    fn delete_value(&self, id: &str, prior: &Value) -> Response;
}

fn parse<C: DeserializeOwned>(type_name: &str, config: &Value) -> Result<C> {
    serde_json::from_value(config.clone())
        .with_context(|| format!("invalid {type_name} configuration"))
}

impl<R: Resource> DynResource for R {
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn computed(&self) -> &'static [&'static str] {
        self.computed_fields()
    }

    fn normalize(&self, config: &Value) -> Result<Value> {
        let parsed: R::Config = parse(Resource::type_name(self), config)?;
        self.validate(&parsed)?;
        Ok(serde_json::to_value(&parsed)?)
    }

    fn create_value(&self, config: &Value) -> Response {
        let result = parse(Resource::type_name(self), config).and_then(|parsed: R::Config| {
            self.validate(&parsed)?;
            self.create(&parsed)
        });
        Response::from_applied(result)
    }

    fn read_value(&self, id: &str) -> Response {
        Response::from_applied(self.read(id))
    }

    fn update_value(&self, id: &str, prior: &Value, desired: &Value) -> Response {
        let type_name = Resource::type_name(self);
        let result = parse(type_name, prior).and_then(|prior: R::Config| {
            let desired: R::Config = parse(type_name, desired)?;
            self.validate(&desired)?;
            self.update(id, &prior, &desired)
        });
        Response::from_applied(result)
    }

    fn delete_value(&self, id: &str, prior: &Value) -> Response {
        let result = parse(Resource::type_name(self), prior)
            .and_then(|prior: R::Config| self.delete(id, &prior));
        match result {
            Ok(()) => Response {
                id: Some(id.to_string()),
                ..Default::default()
            },
            Err(err) => Response::failure(&err),
        }
    }
}

/// Registry of resource types by name
#[derive(Default)]
pub struct Registry {
    resources: BTreeMap<&'static str, Box<dyn DynResource>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource type, replacing any previous one with the same name
    pub fn register(&mut self, resource: impl DynResource + 'static) {
        self.resources.insert(resource.type_name(), Box::new(resource));
    }

    /// Look up a resource type
    pub fn get(&self, type_name: &str) -> Option<&dyn DynResource> {
        self.resources.get(type_name).map(AsRef::as_ref)
    }

    /// Look up a resource type, failing for unknown names
    pub fn require(&self, type_name: &str) -> Result<&dyn DynResource> {
        self.get(type_name).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown resource type '{type_name}' (known: {})",
                self.type_names().join(", ")
            )
        })
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct NoteConfig {
        pub text: String,
        #[serde(default = "default_priority")]
        pub priority: i64,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    fn default_priority() -> i64 {
        1
    }

    /// In-memory resource used by planner and executor tests
    #[derive(Default)]
    pub struct Notes {
        pub store: Mutex<HashMap<String, NoteConfig>>,
        pub fail_on: Option<String>,
    }

    impl Resource for Notes {
        type Config = NoteConfig;

        fn type_name(&self) -> &'static str {
            "note"
        }

        fn computed_fields(&self) -> &'static [&'static str] {
            &["created_at"]
        }

        fn validate(&self, config: &NoteConfig) -> Result<()> {
            anyhow::ensure!(!config.text.is_empty(), "text must not be empty");
            Ok(())
        }

        fn create(&self, config: &NoteConfig) -> Result<Applied<NoteConfig>> {
            if self.fail_on.as_deref() == Some(config.text.as_str()) {
                anyhow::bail!("refusing to create '{}'", config.text);
            }
            let mut store = self.store.lock().unwrap();
            let id = (store.len() + 1).to_string();
            let mut stored = config.clone();
            stored.created_at = Some("now".to_string());
            store.insert(id.clone(), stored);
            drop(store);
            self.read(&id)
        }

        fn read(&self, id: &str) -> Result<Applied<NoteConfig>> {
            let store = self.store.lock().unwrap();
            let config = store
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("note {id} not found"))?;
            Ok(Applied::new(id, config))
        }

        fn update(&self, id: &str, _prior: &NoteConfig, desired: &NoteConfig) -> Result<Applied<NoteConfig>> {
            let mut store = self.store.lock().unwrap();
            let entry = store
                .get_mut(id)
                .ok_or_else(|| anyhow::anyhow!("note {id} not found"))?;
            entry.text = desired.text.clone();
            entry.priority = desired.priority;
            drop(store);
            Ok(self
                .read(id)?
                .with_diagnostic(Diagnostic::warning("updated", "")))
        }

        fn delete(&self, id: &str, _prior: &NoteConfig) -> Result<()> {
            self.store.lock().unwrap().remove(id);
            Ok(())
        }
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let notes = Notes::default();
        let normalized = notes.normalize(&json!({"text": "hi"})).unwrap();
        assert_eq!(
            normalized,
            json!({"text": "hi", "priority": 1, "created_at": null})
        );
    }

    #[test]
    fn test_normalize_rejects_unknown_keys() {
        let notes = Notes::default();
        let err = notes.normalize(&json!({"text": "hi", "colour": "red"})).unwrap_err();
        assert!(format!("{err:#}").contains("colour"));
    }

    #[test]
    fn test_create_value_round_trip() {
        let notes = Notes::default();
        let response = notes.create_value(&json!({"text": "hi"}));
        assert!(!response.has_errors());
        assert_eq!(response.id.as_deref(), Some("1"));
        assert_eq!(response.state.unwrap()["created_at"], "now");
    }

    #[test]
    fn test_validation_failure_is_diagnostic() {
        let notes = Notes::default();
        let response = notes.create_value(&json!({"text": ""}));
        assert!(response.has_errors());
        assert!(response.id.is_none());
        assert!(notes.store.lock().unwrap().is_empty());
    }

    #[test]
    fn test_update_value_keeps_warnings() {
        let notes = Notes::default();
        notes.create_value(&json!({"text": "a"}));
        let response = notes.update_value(
            "1",
            &json!({"text": "a", "priority": 1}),
            &json!({"text": "b", "priority": 2}),
        );
        assert!(!response.has_errors());
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.state.unwrap()["text"], "b");
    }

    #[test]
    fn test_delete_value() {
        let notes = Notes::default();
        notes.create_value(&json!({"text": "a"}));
        let response = notes.delete_value("1", &json!({"text": "a"}));
        assert_eq!(response.id.as_deref(), Some("1"));
        assert!(notes.read_value("1").has_errors());
    }

    #[test]
    fn test_registry() {
        let mut registry = Registry::new();
        registry.register(Notes::default());
        assert!(registry.get("note").is_some());
        assert_eq!(registry.type_names(), vec!["note"]);
        let err = registry.require("nope").err().unwrap();
        assert!(err.to_string().contains("known: note"));
    }
}
