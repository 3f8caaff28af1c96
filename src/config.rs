use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Config
// ============================================================================

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Explicit path to the rudix executable
    pub executable: Option<String>,
    /// Directories searched after PATH
    pub search_paths: Option<Vec<String>>,
    /// Prefix stripped from `rudix --list` output
    pub package_prefix: Option<String>,
}

impl Config {
    /// Load config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        let path = paths::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load config from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Executable path from config, with ~ and env vars expanded.
    pub fn executable_path(&self) -> Option<PathBuf> {
        self.executable.as_deref().map(paths::expand)
    }

    /// Extra search directories, falling back to the built-in default.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        match &self.search_paths {
            Some(dirs) => dirs.iter().map(|d| paths::expand(d)).collect(),
            None => rudixkit::locate::default_search_paths(),
        }
    }

    /// Package-id prefix for `--list` output.
    pub fn package_prefix(&self) -> &str {
        self.package_prefix
            .as_deref()
            .unwrap_or(rudixkit::backend::rudix::DEFAULT_PACKAGE_PREFIX)
    }
}

// ============================================================================
// Tests
// ============================================================================
