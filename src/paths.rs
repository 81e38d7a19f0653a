//! Path resolution for gfwctl
//!
//! # Environment Variables
//!
//! - `GFWCTL_CONFIG_DIR` - Override the config directory
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `GFWCTL_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/gfwctl` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\gfwctl`
//!    - macOS/Linux: `~/.config/gfwctl`
//!
//! Manifest and state files are given on the command line and resolved
//! against the working directory after expansion.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "GFWCTL_CONFIG_DIR";

/// Name of the settings file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Get the gfwctl config directory path
pub fn config_dir() -> Result<PathBuf> {
    config_dir_with(|key| std::env::var(key).ok())
}

/// Resolve the config directory against an environment lookup
fn config_dir_with(env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(dir) = env(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Some(xdg_config) = env("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("gfwctl");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join("gfwctl");
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("gfwctl");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Path of the optional settings file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables leave the string unchanged.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_config_dir_env_override() {
        let vars = [
            (ENV_CONFIG_DIR, "/custom/config/path"),
            ("XDG_CONFIG_HOME", "/xdg"),
        ];
        assert_eq!(
            config_dir_with(lookup(&vars)).unwrap(),
            PathBuf::from("/custom/config/path")
        );
    }

    #[test]
    fn test_config_dir_xdg() {
        let vars = [("XDG_CONFIG_HOME", "/xdg")];
        assert_eq!(
            config_dir_with(lookup(&vars)).unwrap(),
            PathBuf::from("/xdg/gfwctl")
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_config_dir_default() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            config_dir_with(lookup(&[])).unwrap(),
            home.join(".config").join("gfwctl")
        );
    }

    #[test]
    fn test_expand_with_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand("~/gfw/gfw.toml"), home.join("gfw").join("gfw.toml"));
    }

    #[test]
    fn test_expand_relative_unchanged() {
        assert_eq!(expand("gfw.state.json"), PathBuf::from("gfw.state.json"));
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        assert_eq!(
            expand("/path/$GFWCTL_NONEXISTENT_12345/file"),
            PathBuf::from("/path/$GFWCTL_NONEXISTENT_12345/file")
        );
    }
}
