//! `pkgstate list` - print the installed package set.

use anyhow::Result;
use rudixkit::Backend;

use crate::Context;
use crate::config::Config;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let config = Config::load()?;
    let backend = super::backend(ctx, &config)?;
    let installed = backend.list_installed()?;

    if installed.is_empty() {
        if !ctx.quiet {
            ui::info("No packages installed");
        }
        return Ok(());
    }

    if !ctx.quiet {
        ui::kv("executable", &backend.executable().display().to_string());
        ui::kv("installed", &installed.len().to_string());
        println!();
    }
    for name in &installed {
        println!("{name}");
    }

    Ok(())
}
