//! Core types for package reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Desired membership of a package in the installed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Package should be installed
    #[default]
    Present,
    /// Package should not be installed
    Absent,
}

impl DesiredState {
    /// The action that moves a package into this state.
    pub fn action(&self) -> Action {
        match self {
            DesiredState::Present => Action::Install,
            DesiredState::Absent => Action::Remove,
        }
    }

    /// Canonical token for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
        }
    }
}

impl FromStr for DesiredState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "present" | "installed" => Ok(DesiredState::Present),
            "absent" | "removed" => Ok(DesiredState::Absent),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutation issued against the package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `--install <name>`
    Install,
    /// `--remove <name>`
    Remove,
}

impl Action {
    /// Command-line flag for this action.
    pub fn flag(&self) -> &'static str {
        match self {
            Action::Install => "--install",
            Action::Remove => "--remove",
        }
    }

    /// Infinitive verb, as in "failed to install foo".
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Remove => "remove",
        }
    }

    /// Past tense, as in "installed 2 package(s)".
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Install => "installed",
            Action::Remove => "removed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A package name, passed verbatim to the package manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Validate and wrap a package name.
    ///
    /// Names are argv elements, never shell text, so the only things rejected
    /// are ones the tool would misread: empty names, embedded whitespace and
    /// a leading `-`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("name contains whitespace")
        } else if name.starts_with('-') {
            Some("name starts with '-'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::InvalidPackageName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// The name as passed to the tool.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Normalize a package list.
///
/// Each item may itself be comma-delimited (`"foo,bar"`). Pieces are trimmed
/// and empty pieces dropped. Order and duplicates are preserved.
pub fn parse_package_list<I, S>(items: I) -> Result<Vec<PackageName>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packages = Vec::new();
    for item in items {
        for piece in item.as_ref().split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            packages.push(PackageName::new(piece)?);
        }
    }

    if packages.is_empty() {
        return Err(Error::EmptyPackageList);
    }
    Ok(packages)
}

/// Captured result of one package-manager invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, trimmed, for failure messages.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{stdout}\n{stderr}"),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Outcome of a successful reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileResult {
    /// State that was requested
    pub state: DesiredState,
    /// Number of packages acted on (or that would be, in check mode)
    pub changed_count: usize,
    /// Human-readable summary
    pub message: String,
    /// Packages acted on, in input order
    pub packages: Vec<String>,
}

impl ReconcileResult {
    /// Build the result for a finished run.
    pub fn new(state: DesiredState, packages: Vec<String>) -> Self {
        let changed_count = packages.len();
        let message = if changed_count > 0 {
            format!(
                "{} {changed_count} package(s)",
                state.action().past_tense()
            )
        } else {
            format!("package(s) already {state}")
        };

        Self {
            state,
            changed_count,
            message,
            packages,
        }
    }

    /// Build the result for a check-mode run that changed nothing.
    pub fn planned(state: DesiredState, packages: Vec<String>) -> Self {
        let mut result = Self::new(state, packages);
        if result.changed_count > 0 {
            result.message = format!(
                "would {} {} package(s)",
                state.action().verb(),
                result.changed_count
            );
        }
        result
    }

    /// Whether at least one package changed state.
    pub fn changed(&self) -> bool {
        self.changed_count > 0
    }
}
