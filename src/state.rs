//! State file
//!
//! Recorded state lives in a JSON file next to the manifest. It is rewritten
//! after every successful operation so an interrupted apply loses at most
//! the change that was in flight.

use anyhow::{Context, Result};
use declarative::{State, StateStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current file format version
const VERSION: u32 = 1;

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(flatten)]
    state: State,
}

/// JSON file holding recorded state
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load state from disk, or return empty state if the file doesn't exist
    pub fn load(&self) -> Result<State> {
        if !self.path.exists() {
            log::debug!(
                "State file {} does not exist, starting empty",
                self.path.display()
            );
            return Ok(State::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;
        let file: StateFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;
        if file.version > VERSION {
            anyhow::bail!(
                "State file {} has version {}, this build understands up to {VERSION}",
                self.path.display(),
                file.version
            );
        }

        log::debug!(
            "Loaded {} resource(s) from {}",
            file.state.len(),
            self.path.display()
        );
        Ok(file.state)
    }
}

impl StateStore for FileStore {
    /// Write to a sibling temp file, then rename over the old state
    fn persist(&self, state: &State) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let file = StateFile {
            version: VERSION,
            state: state.clone(),
        };
        let content = serde_json::to_string_pretty(&file).context("Failed to serialize state")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write state file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace state file: {}", self.path.display()))?;

        log::debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::{Address, RecordedResource};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> State {
        let mut state = State::new();
        state.upsert(RecordedResource {
            address: Address::new("gfw_role", "analyst"),
            id: "10".into(),
            config: json!({"name": "analyst", "description": ""}),
        });
        state.upsert(RecordedResource {
            address: Address::new("gfw_role_permissions", "analyst"),
            id: "10".into(),
            config: json!({"role": 10, "permissions": [1, 2]}),
        });
        state
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("gfw.state.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("gfw.state.json"));

        store.persist(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
        assert!(!dir.path().join("nested").join("gfw.state.json.tmp").exists());
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("gfw.state.json"));
        store.persist(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["resources"][0]["type"], "gfw_role");
        assert_eq!(raw["resources"][0]["name"], "analyst");
        assert_eq!(raw["resources"][0]["id"], "10");
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gfw.state.json");
        fs::write(&path, r#"{"version": 99, "resources": []}"#).unwrap();
        assert!(FileStore::new(path).load().is_err());
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gfw.state.json");
        fs::write(&path, "{not json").unwrap();
        let err = FileStore::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse state file"));
    }
}
