//! Backend abstraction for package-manager operations.
//!
//! The [`Backend`] trait is the whole surface the reconciler needs from a
//! package manager: list, query, install, remove. [`rudix::RudixBackend`]
//! implements it on top of the `rudix` command-line tool.

pub mod rudix;

use crate::error::Result;
use crate::types::{Action, CommandOutput, PackageName};
use std::path::Path;

/// Backend trait for package-manager operations.
pub trait Backend: Send + Sync {
    /// Path of the executable this backend drives.
    fn executable(&self) -> &Path;

    /// Names of all installed packages, as reported by the tool.
    fn list_installed(&self) -> Result<Vec<String>>;

    /// Check if a package is installed.
    ///
    /// A package that is simply not installed is `Ok(false)`, never an error.
    fn is_installed(&self, package: &PackageName) -> Result<bool> {
        Ok(self
            .list_installed()?
            .iter()
            .any(|installed| installed == package.as_str()))
    }

    /// Install a single package, returning the tool's captured output.
    ///
    /// The exit code is not interpreted here; callers verify by re-querying.
    fn install(&self, package: &PackageName) -> Result<CommandOutput>;

    /// Remove a single package, returning the tool's captured output.
    fn remove(&self, package: &PackageName) -> Result<CommandOutput>;

    /// Run whichever of install/remove `action` names.
    fn apply(&self, action: Action, package: &PackageName) -> Result<CommandOutput> {
        match action {
            Action::Install => self.install(package),
            Action::Remove => self.remove(package),
        }
    }
}
