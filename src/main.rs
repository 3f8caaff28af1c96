mod cli;
mod commands;
mod config;
mod paths;
mod report;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub executable: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        quiet: cli.quiet,
        executable: cli.executable,
    };

    match cli.command {
        Command::Ensure(args) => commands::ensure::run(&ctx, args),
        Command::Query(args) => commands::query::run(&ctx, args).map(|()| ExitCode::SUCCESS),
        Command::List => commands::list::run(&ctx).map(|()| ExitCode::SUCCESS),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pkgstate", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
