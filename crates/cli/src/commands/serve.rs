// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! `lattice serve`: the long-running process. Discovers the current fleet,
//! starts one worker per sprite, and serves the GitHub webhook until killed
//! (spec.md §6, SPEC_FULL.md §10.6 "`lattice-cli` `serve` subcommand").

use crate::exit_error::ExitError;
use std::sync::Arc;

pub async fn run() -> Result<(), ExitError> {
    lattice_daemon::telemetry::init();
    let app = super::build_app()?;
    let supervisor = app.fleet_supervisor();

    let sprites = app
        .capabilities
        .sprites()
        .list()
        .await
        .map_err(|e| ExitError::new(1, format!("failed to discover fleet: {e}")))?;
    for record in &sprites {
        supervisor.spawn(lattice_core::SpriteId::new(record.id.clone()), record.observed_state());
    }
    tracing::info!(count = sprites.len(), "discovered sprite fleet");

    // Leaked deliberately: the supervisor must outlive `run` for as long as
    // the process runs, and `serve` only returns on shutdown or I/O error.
    let _supervisor = supervisor;

    let app = Arc::new(app);
    lattice_daemon::serve(app).await.map_err(|e| ExitError::new(1, format!("listener error: {e}")))
}
