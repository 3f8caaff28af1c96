//! Result reporting for `pkgstate ensure`.
//!
//! Every invocation produces exactly one [`Report`], success or failure,
//! handed to a [`Reporter`] chosen by `--format`.

use anyhow::Result;
use colored::Colorize;
use rudixkit::{DesiredState, ErrorCategory, ReconcileResult};
use serde::Serialize;
use std::io::Write;

use crate::ui;

/// Host-facing outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub changed: bool,
    pub failed: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DesiredState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub check: bool,
    #[serde(skip)]
    pub category: Option<ErrorCategory>,
}

impl Report {
    pub fn success(result: &ReconcileResult, check: bool) -> Self {
        Self {
            changed: result.changed(),
            failed: false,
            msg: result.message.clone(),
            state: Some(result.state),
            packages: result.packages.clone(),
            check,
            category: None,
        }
    }

    /// Failure report; packages changed before the failure are still reported.
    pub fn from_error(err: &rudixkit::Error) -> Self {
        let packages = err.changed_packages().to_vec();
        Self {
            changed: !packages.is_empty(),
            packages,
            ..Self::failure(err.to_string(), Some(err.category()))
        }
    }

    pub fn failure(msg: impl Into<String>, category: Option<ErrorCategory>) -> Self {
        Self {
            changed: false,
            failed: true,
            msg: msg.into(),
            state: None,
            packages: Vec::new(),
            check: false,
            category,
        }
    }
}

/// Receives the final report of an invocation.
pub trait Reporter {
    fn report(&mut self, report: &Report) -> Result<()>;
}

/// Writes the report as a single JSON object.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, report: &Report) -> Result<()> {
        serde_json::to_writer(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Prints the report as colored terminal output.
pub struct HumanReporter {
    pub quiet: bool,
}

impl Reporter for HumanReporter {
    fn report(&mut self, report: &Report) -> Result<()> {
        if report.failed {
            let (first, rest) = report
                .msg
                .split_once('\n')
                .unwrap_or((report.msg.as_str(), ""));
            ui::error(first);
            if !rest.is_empty() {
                eprintln!("{}", ui::indent(rest, 4).dimmed());
            }
            if let Some(category) = report.category {
                ui::dim_err(&format!("{}: {}", category.description(), category.advice()));
            }
            if !report.packages.is_empty() {
                ui::dim_err(&format!("already changed: {}", report.packages.join(", ")));
            }
            return Ok(());
        }

        if report.check && report.changed {
            ui::warn(&report.msg);
        } else if report.changed {
            ui::success(&report.msg);
        } else {
            ui::info(&report.msg);
        }

        if !self.quiet {
            for name in &report.packages {
                ui::dim(name);
            }
        }
        Ok(())
    }
}
