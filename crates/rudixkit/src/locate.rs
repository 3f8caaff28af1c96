//! Locate the package-manager executable.
//!
//! Resolution happens once, before any package is processed, so a missing
//! tool fails the invocation without spawning anything.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Executable name looked up on `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "rudix";

/// Directories searched after `PATH`.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &["/usr/local/bin"];

/// Resolve the executable to run.
///
/// An explicit path must point at an executable file. Otherwise `name` is
/// looked up on `PATH`, then in each of `extra_dirs` in order.
pub fn locate_executable(
    explicit: Option<&Path>,
    name: &str,
    extra_dirs: &[PathBuf],
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if is_executable_file(path) {
            log::debug!("Using explicit executable: {}", path.display());
            return Ok(path.to_path_buf());
        }
        return Err(Error::ExecutableNotFound {
            name: path.display().to_string(),
            searched: Vec::new(),
        });
    }

    if let Ok(path) = which::which(name) {
        log::debug!("Found {name} on PATH: {}", path.display());
        return Ok(path);
    }

    for dir in extra_dirs {
        let candidate = dir.join(name);
        if is_executable_file(&candidate) {
            log::debug!("Found {name} in {}", dir.display());
            return Ok(candidate);
        }
    }

    Err(Error::ExecutableNotFound {
        name: name.to_string(),
        searched: extra_dirs.to_vec(),
    })
}

/// Default extra search directories as paths.
pub fn default_search_paths() -> Vec<PathBuf> {
    DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect()
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
