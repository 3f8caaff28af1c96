use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pkgstate")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Keep Rudix packages present or absent", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the rudix executable (default: search PATH and /usr/local/bin)
    #[arg(long, global = true, env = "PKGSTATE_EXECUTABLE")]
    pub executable: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install or remove packages so they match the desired state
    Ensure(EnsureArgs),

    /// Show whether packages are installed
    Query(PackageArgs),

    /// List installed packages
    List,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct PackageArgs {
    /// Package name(s), repeated or comma-separated
    #[arg(short, long = "name", visible_alias = "pkg", required = true, num_args = 1..)]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct EnsureArgs {
    #[command(flatten)]
    pub packages: PackageArgs,

    /// Desired state: present/installed or absent/removed
    #[arg(short, long, default_value = "present")]
    pub state: String,

    /// Only report what would change
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored text for terminals
    Human,
    /// A single JSON object for configuration-management hosts
    Json,
}
