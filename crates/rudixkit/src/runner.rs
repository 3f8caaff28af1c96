//! Command execution seam.
//!
//! The reconciler never spawns processes itself. It goes through a
//! [`CommandRunner`], so tests can substitute a scripted package database
//! for the real tool.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::types::CommandOutput;

/// Runs a program with arguments and captures its output.
///
/// Implementations must not go through a shell: arguments are passed to the
/// program as-is.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, returning exit code and captured output.
    ///
    /// A non-zero exit is not an error; only failing to run the program is.
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        let command_line = format_command(program, args);
        log::debug!("Running: {command_line}");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                command: command_line.clone(),
                source,
            })?;

        log::trace!("{command_line} exited with {:?}", output.status.code());

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Render a command line for logs and error messages.
pub fn format_command(program: &Path, args: &[&str]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
