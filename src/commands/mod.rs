//! Command implementations
//!
//! - `plan` / `apply` / `destroy` - converge the API towards the manifest
//! - `refresh` - re-read managed resources into state
//! - `show` - print recorded state

pub mod plan;
pub mod refresh;
pub mod show;

use anyhow::{Context as AnyhowContext, Result};
use declarative::{Registry, State};
use gfwapi::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::{FileArgs, ProviderArgs};
use crate::manifest::Manifest;
use crate::state::FileStore;
use crate::{config, paths, resource};

/// Registered resource types plus the state they operate on
pub struct Session {
    pub registry: Registry,
    pub store: FileStore,
    pub state: State,
}

impl Session {
    /// Resolve provider settings, connect and load state
    pub fn open(provider: &ProviderArgs, files: &FileArgs) -> Result<Self> {
        let settings = config::load(provider)?;
        let client = Client::new(&settings).context("Failed to create API client")?;
        Self::with_client(&Arc::new(client), files)
    }

    /// Load state for an already constructed client
    pub fn with_client(client: &Arc<Client>, files: &FileArgs) -> Result<Self> {
        let store = state_store(files);
        let state = store.load()?;
        Ok(Self {
            registry: resource::registry(client),
            store,
            state,
        })
    }
}

/// State file named on the command line
pub fn state_store(files: &FileArgs) -> FileStore {
    FileStore::new(expand(&files.state))
}

/// Manifest named on the command line
pub fn load_manifest(files: &FileArgs) -> Result<Manifest> {
    Manifest::load(&expand(&files.manifest))
}

fn expand(path: &Path) -> PathBuf {
    paths::expand(&path.to_string_lossy())
}
