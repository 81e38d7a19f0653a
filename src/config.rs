//! Provider settings
//!
//! Each setting resolves from the command line first (clap also reads the
//! `GFW_URL` and `GFW_TOKEN` environment variables there), then from the
//! optional `config.toml` in the config directory, then from defaults.

use anyhow::{Context, Result, bail};
use gfwapi::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::cli::ProviderArgs;

/// Per-request deadline when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FileSettings {
    /// Load settings, or return defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Merge command-line values over file values into client settings
///
/// # Errors
///
/// Fails when no source provides a URL or a token.
pub fn resolve(args: &ProviderArgs, file: FileSettings) -> Result<ClientConfig> {
    let Some(url) = non_empty(args.url.clone()).or_else(|| non_empty(file.url)) else {
        bail!("No API URL configured. Pass --url, set GFW_URL, or add `url` to config.toml");
    };
    let Some(token) = non_empty(args.token.clone()).or_else(|| non_empty(file.token)) else {
        bail!("No API token configured. Pass --token, set GFW_TOKEN, or add `token` to config.toml");
    };
    let timeout = args
        .timeout
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    log::debug!("Using API at {url} with a {timeout}s timeout");
    Ok(ClientConfig::new(url, token).timeout(Duration::from_secs(timeout)))
}

/// Load the settings file and resolve against the command line
pub fn load(args: &ProviderArgs) -> Result<ClientConfig> {
    let file = FileSettings::load(&crate::paths::config_file()?)?;
    resolve(args, file)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(url: Option<&str>, token: Option<&str>, timeout: Option<u64>) -> ProviderArgs {
        ProviderArgs {
            url: url.map(String::from),
            token: token.map(String::from),
            timeout,
        }
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let settings = FileSettings::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, FileSettings::default());
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "url = \"https://gateway.api.dev.globalfishingwatch.org/v3\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let settings = FileSettings::load(&path).unwrap();
        assert_eq!(settings.timeout_secs, Some(30));
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"x\"\n").unwrap();
        assert!(FileSettings::load(&path).is_err());
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = FileSettings {
            url: Some("https://file.example".into()),
            token: Some("file-token".into()),
            timeout_secs: Some(30),
        };
        let config = resolve(&args(Some("https://flag.example"), None, Some(5)), file).unwrap();
        assert_eq!(config.url, "https://flag.example");
        assert_eq!(config.token, "file-token");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_timeout() {
        let config = resolve(
            &args(Some("https://api.example"), Some("t"), None),
            FileSettings::default(),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_token_is_error() {
        let err = resolve(
            &args(Some("https://api.example"), Some("  "), None),
            FileSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}
