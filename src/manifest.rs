//! Manifest loading
//!
//! A manifest is a TOML file listing the desired resources in order:
//!
//! ```toml
//! [[resource]]
//! type = "gfw_role"
//! name = "analyst"
//! config = { name = "analyst", description = "Read-only analysis" }
//!
//! [[resource]]
//! type = "gfw_role_permissions"
//! name = "analyst"
//! config = { role = "${gfw_role.analyst.id}", permissions = [1, 2] }
//! ```
//!
//! Each `config` table is handed to the resource type as JSON. String values
//! of the form `${type.name.id}` are resolved against state when applied.

use anyhow::{Context, Result, bail};
use declarative::{Address, DesiredResource};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Parsed manifest file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "resource")]
    pub resources: Vec<Entry>,
}

/// One `[[resource]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub config: toml::Table,
}

impl Manifest {
    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        for entry in &manifest.resources {
            if entry.type_name.is_empty() || entry.name.is_empty() || entry.name.contains('.') {
                bail!(
                    "invalid resource address '{}.{}': type and name must be non-empty and the name may not contain '.'",
                    entry.type_name,
                    entry.name
                );
            }
        }
        Ok(manifest)
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest = Self::parse(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
        log::debug!(
            "Loaded {} resource(s) from {}",
            manifest.resources.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Desired resources in manifest order
    pub fn desired(&self) -> Vec<DesiredResource> {
        self.resources
            .iter()
            .map(|entry| DesiredResource {
                address: Address::new(&entry.type_name, &entry.name),
                config: table_to_json(&entry.config),
            })
            .collect()
    }
}

fn table_to_json(table: &toml::Table) -> Value {
    Value::Object(
        table
            .iter()
            .map(|(key, value)| (key.clone(), to_json(value)))
            .collect::<Map<_, _>>(),
    )
}

/// Convert a TOML value to JSON; datetimes become their RFC 3339 text
fn to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        toml::Value::Table(table) => table_to_json(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[[resource]]
type = "gfw_role"
name = "analyst"
config = { name = "analyst", description = "Read-only analysis" }

[[resource]]
type = "gfw_workspace"
name = "ocean"

[resource.config]
name = "Ocean Watch"
description = "Regional monitoring"
start_at = 2024-01-01T00:00:00Z
viewport = [{ zoom = 3.5, latitude = 10.0, longitude = -20.0 }]
dataviews = ["${gfw_dataview.effort.id}"]
"#;

    #[test]
    fn test_parse_keeps_order() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        let desired = manifest.desired();
        assert_eq!(desired.len(), 2);
        assert_eq!(desired[0].address, Address::new("gfw_role", "analyst"));
        assert_eq!(desired[1].address, Address::new("gfw_workspace", "ocean"));
    }

    #[test]
    fn test_config_converts_to_json() {
        let desired = Manifest::parse(MANIFEST).unwrap().desired();
        assert_eq!(
            desired[0].config,
            json!({"name": "analyst", "description": "Read-only analysis"})
        );

        let workspace = &desired[1].config;
        assert_eq!(workspace["start_at"], "2024-01-01T00:00:00Z");
        assert_eq!(workspace["viewport"][0]["zoom"], 3.5);
        assert_eq!(workspace["dataviews"][0], "${gfw_dataview.effort.id}");
    }

    #[test]
    fn test_missing_config_is_empty_object() {
        let manifest = Manifest::parse("[[resource]]\ntype = \"gfw_action\"\nname = \"read\"\n")
            .unwrap();
        assert_eq!(manifest.desired()[0].config, json!({}));
    }

    #[test]
    fn test_rejects_dotted_name() {
        let err =
            Manifest::parse("[[resource]]\ntype = \"gfw_role\"\nname = \"a.b\"\n").unwrap_err();
        assert!(err.to_string().contains("a.b"));
    }

    #[test]
    fn test_rejects_unknown_entry_keys() {
        let text = "[[resource]]\ntype = \"gfw_role\"\nname = \"a\"\nid = 3\n";
        assert!(Manifest::parse(text).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("gfw.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert!(manifest.desired().is_empty());
    }
}
