//! # rudixkit
//!
//! Idempotent package-state reconciliation on top of the Rudix
//! command-line package manager.
//!
//! This crate provides:
//! - Locating the `rudix` executable on `PATH` or a fallback directory
//! - Querying installed packages with exact name matching
//! - Installing or removing packages only when they are not already in the
//!   desired state, then verifying the result
//!
//! ## Example
//!
//! ```no_run
//! use rudixkit::{locate_executable, parse_package_list, DesiredState, Reconciler, RudixBackend};
//!
//! let exe = locate_executable(None, "rudix", &rudixkit::locate::default_search_paths())
//!     .expect("rudix not installed");
//! let backend = RudixBackend::new(exe);
//!
//! let packages = parse_package_list(["wget,curl"]).expect("bad package list");
//! let result = Reconciler::new(&backend)
//!     .reconcile(DesiredState::Present, &packages)
//!     .expect("reconcile failed");
//!
//! println!("changed={} {}", result.changed(), result.message);
//! ```
//!
//! ## Failure model
//!
//! Packages are processed in order and the first package that does not reach
//! the desired state ends the call with [`Error::Verification`]. There is no
//! retry and no rollback of packages already changed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod locate;
pub mod reconcile;
pub mod runner;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::Backend;
pub use backend::rudix::RudixBackend;
pub use error::{Error, ErrorCategory, Result};
pub use locate::locate_executable;
pub use reconcile::Reconciler;
pub use runner::{CommandRunner, SystemRunner};
pub use types::{
    Action, CommandOutput, DesiredState, PackageName, ReconcileResult, parse_package_list,
};
