//! Idempotent install/remove reconciliation.
//!
//! Each package goes through `query -> {skip | act -> re-query}`. A package
//! already in the desired state is skipped without running the tool. A
//! package that is still in the wrong state after the tool ran stops the
//! whole call: packages after it are never attempted, and changes made
//! before it are kept.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{DesiredState, PackageName, ReconcileResult};

/// Drives a [`Backend`] towards a desired state, one package at a time.
pub struct Reconciler<'a, B: Backend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: Backend + ?Sized> Reconciler<'a, B> {
    /// Create a reconciler over `backend`.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Whether `package` is currently installed.
    pub fn query_installed(&self, package: &PackageName) -> Result<bool> {
        self.backend.is_installed(package)
    }

    /// Install every package that is not already installed.
    pub fn install(&self, packages: &[PackageName]) -> Result<ReconcileResult> {
        self.converge(DesiredState::Present, packages)
    }

    /// Remove every package that is currently installed.
    pub fn remove(&self, packages: &[PackageName]) -> Result<ReconcileResult> {
        self.converge(DesiredState::Absent, packages)
    }

    /// Dispatch to [`install`](Self::install) or [`remove`](Self::remove).
    pub fn reconcile(
        &self,
        state: DesiredState,
        packages: &[PackageName],
    ) -> Result<ReconcileResult> {
        match state {
            DesiredState::Present => self.install(packages),
            DesiredState::Absent => self.remove(packages),
        }
    }

    /// Report what [`reconcile`](Self::reconcile) would change, without
    /// running install or remove.
    pub fn plan(&self, state: DesiredState, packages: &[PackageName]) -> Result<ReconcileResult> {
        let mut pending: Vec<String> = Vec::new();
        for package in packages {
            if pending.iter().any(|p| p == package.as_str()) {
                continue;
            }
            if !self.in_state(package, state)? {
                pending.push(package.to_string());
            }
        }
        Ok(ReconcileResult::planned(state, pending))
    }

    fn converge(&self, state: DesiredState, packages: &[PackageName]) -> Result<ReconcileResult> {
        let action = state.action();
        let mut changed = Vec::new();

        for package in packages {
            if self.in_state(package, state)? {
                log::debug!("{package} already {state}, skipping");
                continue;
            }

            log::info!("Attempting to {action} {package}");
            let output = self.backend.apply(action, package)?;

            if !self.in_state(package, state)? {
                log::warn!("{package} still not {state} after {action}");
                return Err(Error::Verification {
                    package: package.to_string(),
                    action,
                    output: output.combined(),
                    changed,
                });
            }

            log::info!("{package} {}", action.past_tense());
            changed.push(package.to_string());
        }

        Ok(ReconcileResult::new(state, changed))
    }

    fn in_state(&self, package: &PackageName, state: DesiredState) -> Result<bool> {
        let installed = self.query_installed(package)?;
        Ok(match state {
            DesiredState::Present => installed,
            DesiredState::Absent => !installed,
        })
    }
}
