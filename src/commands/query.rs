//! `pkgstate query` - show installed/absent for each package.

use anyhow::Result;
use colored::Colorize;
use rudixkit::{Reconciler, parse_package_list};

use crate::Context;
use crate::cli::PackageArgs;
use crate::config::Config;

pub fn run(ctx: &Context, args: PackageArgs) -> Result<()> {
    let packages = parse_package_list(&args.names)?;
    let config = Config::load()?;
    let backend = super::backend(ctx, &config)?;
    let reconciler = Reconciler::new(&backend);

    for package in &packages {
        let status = if reconciler.query_installed(package)? {
            "installed".green()
        } else {
            "absent".yellow()
        };
        println!("{package:<30} {status}");
    }

    Ok(())
}
