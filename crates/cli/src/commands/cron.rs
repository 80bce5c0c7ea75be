// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! `lattice cron`: sequentially runs fleet audit + credential sync + skill
//! sync, exiting non-zero if any step failed (spec.md §6).

use crate::exit_error::ExitError;

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

    let report = lattice_daemon::run_cron(&app, &supervisor)
        .await
        .map_err(|e| ExitError::new(1, format!("cron run failed: {e}")))?;

    println!(
        "{}",
        serde_json::json!({
            "fleet_total": report.fleet_summary.total,
            "credentials_synced": report.credentials_synced,
        })
    );
    Ok(())
}
