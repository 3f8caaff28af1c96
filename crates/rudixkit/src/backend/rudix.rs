//! Real Rudix CLI backend using `rudix` commands.

use crate::backend::Backend;
use crate::error::Result;
use crate::runner::{CommandRunner, SystemRunner};
use crate::types::{Action, CommandOutput, PackageName};
use std::path::{Path, PathBuf};

/// Prefix Rudix puts in front of package names in `--list` output.
pub const DEFAULT_PACKAGE_PREFIX: &str = "org.rudix.pkg.";

/// Backend that executes real `rudix` commands.
pub struct RudixBackend<R: CommandRunner = SystemRunner> {
    executable: PathBuf,
    runner: R,
    package_prefix: String,
}

impl RudixBackend<SystemRunner> {
    /// Create a backend for the executable at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self::with_runner(executable, SystemRunner)
    }
}

impl<R: CommandRunner> RudixBackend<R> {
    /// Create a backend with a custom runner (useful for testing).
    pub fn with_runner(executable: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
            package_prefix: DEFAULT_PACKAGE_PREFIX.to_string(),
        }
    }

    /// Override the package-id prefix stripped from `--list` output.
    pub fn with_package_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.package_prefix = prefix.into();
        self
    }

    fn run_rudix(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run(&self.executable, args)
    }
}

impl<R: CommandRunner> Backend for RudixBackend<R> {
    fn executable(&self) -> &Path {
        &self.executable
    }

    fn list_installed(&self) -> Result<Vec<String>> {
        let output = self.run_rudix(&["--list"])?;
        if !output.success() {
            log::debug!(
                "rudix --list exited with {:?}, treating as nothing installed",
                output.code
            );
            return Ok(Vec::new());
        }
        Ok(parse_list_output(&output.stdout, &self.package_prefix))
    }

    fn install(&self, package: &PackageName) -> Result<CommandOutput> {
        self.run_rudix(&[Action::Install.flag(), package.as_str()])
    }

    fn remove(&self, package: &PackageName) -> Result<CommandOutput> {
        self.run_rudix(&[Action::Remove.flag(), package.as_str()])
    }
}

/// Parse `rudix --list` output into bare package names.
///
/// Takes the first whitespace-delimited token of each non-blank line and
/// strips `prefix` from it when present. Membership checks against the
/// result are exact, so `foo` never matches an installed `foo-dev`.
pub fn parse_list_output(stdout: &str, prefix: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(|token| {
            if prefix.is_empty() {
                token
            } else {
                token.strip_prefix(prefix).unwrap_or(token)
            }
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRudix;

    fn pkg(name: &str) -> PackageName {
        PackageName::new(name).unwrap()
    }

    #[test]
    fn test_parse_list_output() {
        let stdout = "org.rudix.pkg.wget\norg.rudix.pkg.foo-dev\n\n  plain-name  1.0\n";
        assert_eq!(
            parse_list_output(stdout, DEFAULT_PACKAGE_PREFIX),
            vec!["wget", "foo-dev", "plain-name"]
        );
    }

    #[test]
    fn test_parse_list_output_without_prefix() {
        let stdout = "org.rudix.pkg.wget\n";
        assert_eq!(parse_list_output(stdout, ""), vec!["org.rudix.pkg.wget"]);
    }

    #[test]
    fn test_is_installed_is_exact() {
        let fake = FakeRudix::with_installed(&["foo-dev", "libfoo"]);
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &fake);

        assert!(!backend.is_installed(&pkg("foo")).unwrap());
        assert!(backend.is_installed(&pkg("foo-dev")).unwrap());
        assert!(backend.is_installed(&pkg("libfoo")).unwrap());
    }

    #[test]
    fn test_failed_list_means_not_installed() {
        let fake = FakeRudix::with_installed(&["foo"]);
        fake.fail_list();
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &fake);

        assert!(backend.list_installed().unwrap().is_empty());
        assert!(!backend.is_installed(&pkg("foo")).unwrap());
    }

    #[test]
    fn test_install_and_remove_invoke_tool() {
        let fake = FakeRudix::default();
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &fake);

        let out = backend.install(&pkg("wget")).unwrap();
        assert!(out.success());
        assert!(backend.is_installed(&pkg("wget")).unwrap());

        backend.remove(&pkg("wget")).unwrap();
        assert!(!backend.is_installed(&pkg("wget")).unwrap());

        assert_eq!(
            fake.mutations(),
            vec![
                vec!["--install".to_string(), "wget".to_string()],
                vec!["--remove".to_string(), "wget".to_string()],
            ]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let fake = FakeRudix::with_installed(&["wget"]).with_prefix("net.example.");
        let backend =
            RudixBackend::with_runner("/usr/local/bin/rudix", &fake).with_package_prefix("net.example.");
        assert_eq!(backend.list_installed().unwrap(), vec!["wget"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_against_script() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("rudix");
        std::fs::write(
            &script,
            r#"#!/bin/sh
db="$(dirname "$0")/installed"
touch "$db"
case "$1" in
  --list) cat "$db" ;;
  --install) echo "org.rudix.pkg.$2" >> "$db"; echo "Installing $2" ;;
  --remove) grep -v "^org.rudix.pkg.$2\$" "$db" > "$db.tmp"; mv "$db.tmp" "$db" ;;
  *) echo "unknown option $1" >&2; exit 2 ;;
esac
"#,
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let backend = RudixBackend::new(&script);
        assert!(!backend.is_installed(&pkg("wget")).unwrap());

        let out = backend.install(&pkg("wget")).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "Installing wget");
        assert!(backend.is_installed(&pkg("wget")).unwrap());
        assert!(!backend.is_installed(&pkg("wge")).unwrap());

        backend.remove(&pkg("wget")).unwrap();
        assert!(!backend.is_installed(&pkg("wget")).unwrap());
    }
}
