//! Error types for Rudix operations.
//!
//! Every error is terminal for the invocation that produced it. Categories
//! exist only to drive user feedback, not retry decisions.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Action;

/// Categories of errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The tool ran but the package did not reach the desired state
    Verification,
    /// The package-manager executable could not be found
    NotFound,
    /// Bad package list or state token, rejected before running anything
    InvalidInput,
    /// Spawning or talking to the tool failed
    Execution,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Verification => "Package did not reach the desired state",
            Self::NotFound => "Rudix not installed",
            Self::InvalidInput => "Invalid input",
            Self::Execution => "Failed to run the package manager",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Verification => "Check the captured output above; the package name may be wrong",
            Self::NotFound => "Install Rudix or pass --executable with the path to the rudix binary",
            Self::InvalidInput => "Pass at least one package name and a state of present or absent",
            Self::Execution => "Check that the executable is runnable by the current user",
        }
    }
}

/// Errors that can occur while reconciling packages.
#[derive(Debug, Error)]
pub enum Error {
    /// The tool was invoked but a re-query shows the package in the wrong state
    #[error("failed to {action} {package}{detail}", detail = detail(.output))]
    Verification {
        /// Package that failed verification
        package: String,
        /// What was attempted
        action: Action,
        /// Captured stdout and stderr of the install/remove command
        output: String,
        /// Packages changed earlier in the same call, which stay changed
        changed: Vec<String>,
    },

    /// The package-manager executable could not be resolved
    #[error("{name} executable not found (searched PATH and {dirs})", dirs = display_dirs(.searched))]
    ExecutableNotFound {
        /// Executable name or explicit path that was looked up
        name: String,
        /// Extra directories searched after PATH
        searched: Vec<PathBuf>,
    },

    /// No package names were supplied
    #[error("no package names given")]
    EmptyPackageList,

    /// Unrecognized desired-state token
    #[error("invalid state '{0}' (expected present, installed, absent or removed)")]
    InvalidState(String),

    /// A package name that cannot be passed to the tool safely
    #[error("invalid package name '{name}': {reason}")]
    InvalidPackageName {
        /// The offending name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The tool could not be spawned
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Get the error category for user feedback.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Verification { .. } => ErrorCategory::Verification,
            Error::ExecutableNotFound { .. } => ErrorCategory::NotFound,
            Error::EmptyPackageList
            | Error::InvalidState(_)
            | Error::InvalidPackageName { .. } => ErrorCategory::InvalidInput,
            Error::Spawn { .. } => ErrorCategory::Execution,
        }
    }

    /// Name of the package this error is attributed to, if any.
    pub fn package(&self) -> Option<&str> {
        match self {
            Error::Verification { package, .. } => Some(package),
            Error::InvalidPackageName { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Packages this call changed before failing.
    pub fn changed_packages(&self) -> &[String] {
        match self {
            Error::Verification { changed, .. } => changed,
            _ => &[],
        }
    }
}

fn detail(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {output}")
    }
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "no extra directories".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for Rudix operations.
pub type Result<T> = std::result::Result<T, Error>;
