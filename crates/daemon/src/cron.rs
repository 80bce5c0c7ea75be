// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The `lattice cron` task runner (spec.md §6 "sequentially runs fleet
//! audit + credential sync + skill sync; exits non-zero if any step
//! failed").

use crate::app::App;
use lattice_capability::CapabilityError;
use lattice_core::{Clock, FleetSummary};
use lattice_engine::FleetSupervisor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CronError {
    #[error("credential sync failed: {0}")]
    CredentialSync(#[from] CapabilityError),
}

/// Outcome of one `lattice cron` run, step by step, for the caller to report
/// and turn into an exit code.
#[derive(Debug)]
pub struct CronReport {
    pub fleet_summary: FleetSummary,
    pub credentials_synced: usize,
}

/// Run every cron step in order, stopping at the first failure (spec.md §6
/// "exits non-zero if any step failed").
pub async fn run_cron<C: Clock>(app: &App, supervisor: &FleetSupervisor<C>) -> Result<CronReport, CronError> {
    let fleet_summary = supervisor.run_audit().await;
    let credentials_synced = credential_sync(app).await?;
    skill_sync(app);

    Ok(CronReport { fleet_summary, credentials_synced })
}

/// Re-read the credential names backing the Secret Store capability,
/// confirming each still resolves. A real credential-rotation flow would
/// additionally push freshly-synced values into the capability registry;
/// this process has no external credential provider to sync from, so it
/// validates what's already loaded.
async fn credential_sync(app: &App) -> Result<usize, CapabilityError> {
    let names = app.capabilities.secret_store().list_secrets().await?;
    Ok(names.len())
}

/// No skill registry exists in this system yet; this is a deliberate no-op
/// placeholder for the named cron step.
fn skill_sync(_app: &App) {}

#[cfg(test)]
#[path = "cron_tests.rs"]
mod tests;
