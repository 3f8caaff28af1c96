//! `pkgstate ensure` - converge packages to present or absent.

use anyhow::Result;
use rudixkit::{Backend, DesiredState, PackageName, Reconciler, parse_package_list};
use std::io;
use std::process::ExitCode;

use crate::Context;
use crate::cli::{EnsureArgs, OutputFormat};
use crate::config::Config;
use crate::report::{HumanReporter, JsonReporter, Report, Reporter};

pub fn run(ctx: &Context, args: EnsureArgs) -> Result<ExitCode> {
    let mut reporter: Box<dyn Reporter> = match args.format {
        OutputFormat::Json => Box::new(JsonReporter::new(io::stdout().lock())),
        OutputFormat::Human => Box::new(HumanReporter { quiet: ctx.quiet }),
    };

    let report = ensure(ctx, &args).unwrap_or_else(|err| failure_report(&err));
    reporter.report(&report)?;

    Ok(if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn ensure(ctx: &Context, args: &EnsureArgs) -> Result<Report> {
    // Input is validated before anything is spawned
    let state: DesiredState = args.state.parse()?;
    let packages = parse_package_list(&args.packages.names)?;

    let config = Config::load()?;
    let backend = super::backend(ctx, &config)?;

    Ok(reconcile_report(&backend, state, &packages, args.check)?)
}

/// Run (or plan) the reconciliation and shape the result for reporting.
fn reconcile_report<B: Backend>(
    backend: &B,
    state: DesiredState,
    packages: &[PackageName],
    check: bool,
) -> rudixkit::Result<Report> {
    let reconciler = Reconciler::new(backend);
    let result = if check {
        reconciler.plan(state, packages)?
    } else {
        reconciler.reconcile(state, packages)?
    };
    Ok(Report::success(&result, check))
}

fn failure_report(err: &anyhow::Error) -> Report {
    log::debug!("ensure failed: {err:?}");
    match err.downcast_ref::<rudixkit::Error>() {
        Some(e) => Report::from_error(e),
        None => Report::failure(format!("{err:#}"), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rudixkit::{CommandOutput, CommandRunner, ErrorCategory, RudixBackend};
    use std::collections::BTreeSet;
    use std::path::Path;
    use std::sync::Mutex;

    /// Package database that refuses to install anything named in `stuck`.
    #[derive(Default)]
    struct Db {
        installed: Mutex<BTreeSet<String>>,
        stuck: BTreeSet<String>,
        mutations: Mutex<usize>,
    }

    impl CommandRunner for Db {
        fn run(&self, _program: &Path, args: &[&str]) -> rudixkit::Result<CommandOutput> {
            let mut installed = self.installed.lock().unwrap();
            let stdout: String = match args {
                ["--list"] => installed
                    .iter()
                    .map(|n| format!("org.rudix.pkg.{n}\n"))
                    .collect(),
                ["--install", name] => {
                    *self.mutations.lock().unwrap() += 1;
                    if !self.stuck.contains(*name) {
                        installed.insert((*name).to_string());
                    }
                    format!("Installing {name}")
                }
                ["--remove", name] => {
                    *self.mutations.lock().unwrap() += 1;
                    installed.remove(*name);
                    String::new()
                }
                _ => String::new(),
            };
            Ok(CommandOutput {
                code: Some(0),
                stdout,
                stderr: String::new(),
            })
        }
    }

    fn pkgs(names: &[&str]) -> Vec<PackageName> {
        parse_package_list(names).unwrap()
    }

    #[test]
    fn test_report_after_install() {
        let db = Db::default();
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &db);

        let report =
            reconcile_report(&backend, DesiredState::Present, &pkgs(&["foo"]), false).unwrap();
        assert!(report.changed);
        assert!(!report.failed);
        assert_eq!(report.msg, "installed 1 package(s)");

        let report =
            reconcile_report(&backend, DesiredState::Present, &pkgs(&["foo"]), false).unwrap();
        assert!(!report.changed);
        assert_eq!(report.msg, "package(s) already present");
    }

    #[test]
    fn test_check_mode_does_not_mutate() {
        let db = Db::default();
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &db);

        let report =
            reconcile_report(&backend, DesiredState::Present, &pkgs(&["foo", "bar"]), true)
                .unwrap();
        assert!(report.changed);
        assert!(report.check);
        assert_eq!(report.msg, "would install 2 package(s)");
        assert_eq!(*db.mutations.lock().unwrap(), 0);
    }

    #[test]
    fn test_verification_failure_report() {
        let db = Db {
            stuck: BTreeSet::from(["bar".to_string()]),
            ..Default::default()
        };
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &db);

        let err = reconcile_report(
            &backend,
            DesiredState::Present,
            &pkgs(&["foo", "bar", "baz"]),
            false,
        )
        .unwrap_err();
        let report = failure_report(&err.into());

        assert!(report.failed);
        assert!(report.changed);
        assert_eq!(report.packages, vec!["foo"]);
        assert_eq!(report.msg, "failed to install bar: Installing bar");
        assert_eq!(report.category, Some(ErrorCategory::Verification));
        assert_eq!(*db.mutations.lock().unwrap(), 2);
    }

    #[test]
    fn test_failure_report_keeps_earlier_changes() {
        let db = Db {
            stuck: BTreeSet::from(["b".to_string()]),
            ..Default::default()
        };
        let backend = RudixBackend::with_runner("/usr/local/bin/rudix", &db);

        let err = reconcile_report(
            &backend,
            DesiredState::Present,
            &pkgs(&["a,b,c"]),
            false,
        )
        .unwrap_err();
        let report = failure_report(&err.into());

        assert!(report.failed);
        assert!(report.changed);
        assert_eq!(report.packages, vec!["a"]);
        assert_eq!(report.msg, "failed to install b: Installing b");
        assert!(db.installed.lock().unwrap().contains("a"));
    }

    #[test]
    fn test_invalid_state_reported_as_input_error() {
        let err: anyhow::Error = "latest".parse::<DesiredState>().unwrap_err().into();
        let report = failure_report(&err);
        assert!(report.failed);
        assert_eq!(report.category, Some(ErrorCategory::InvalidInput));
    }

    #[test]
    fn test_other_errors_keep_context() {
        let err = anyhow::anyhow!("toml parse error").context("Invalid config format in x.toml");
        let report = failure_report(&err);
        assert_eq!(
            report.msg,
            "Invalid config format in x.toml: toml parse error"
        );
        assert_eq!(report.category, None);
    }
}
