// Package state commands
pub mod ensure;
pub mod list;
pub mod query;

use rudixkit::RudixBackend;

use crate::Context;
use crate::config::Config;

/// Build a backend from CLI flags and config.
///
/// The executable is resolved here, before any package is looked at.
/// Precedence: `--executable` / `PKGSTATE_EXECUTABLE`, then `executable` in
/// the config file, then PATH and the configured search directories.
pub fn backend(ctx: &Context, config: &Config) -> rudixkit::Result<RudixBackend> {
    let explicit = ctx.executable.clone().or_else(|| config.executable_path());
    let exe = rudixkit::locate_executable(
        explicit.as_deref(),
        rudixkit::locate::DEFAULT_EXECUTABLE,
        &config.search_dirs(),
    )?;
    log::info!("Using {}", exe.display());

    Ok(RudixBackend::new(exe).with_package_prefix(config.package_prefix()))
}
