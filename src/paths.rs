//! Path resolution for pkgstate
//!
//! # Environment Variables
//!
//! - `PKGSTATE_CONFIG_DIR` - Override config directory
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `PKGSTATE_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/pkgstate` (if set)
//! 3. `~/.config/pkgstate`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "PKGSTATE_CONFIG_DIR";

const APP_DIR: &str = "pkgstate";

/// Get the pkgstate config directory path
pub fn config_dir() -> Result<PathBuf> {
    config_dir_with(|key| std::env::var(key).ok())
}

/// Resolve the config directory using `env` to read environment variables.
fn config_dir_with(env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    // 1. Check environment variable override
    if let Some(dir) = env(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    // 2. Check XDG_CONFIG_HOME
    if let Some(xdg_config) = env("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Default: ~/.config/pkgstate
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
