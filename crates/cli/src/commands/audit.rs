// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! `lattice audit`: discovers the fleet, runs one fleet-wide reconcile, and
//! waits for the aggregate summary (spec.md §6; §5 "`run_audit()` waits up
//! to a fleet-wide timeout (default 30s) ... on expiry it returns with a
//! partial result").

use crate::exit_error::ExitError;
use std::time::Duration;

const AUDIT_TIMEOUT: Duration = Duration::from_secs(30);

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

    match tokio::time::timeout(AUDIT_TIMEOUT, supervisor.run_audit()).await {
        Ok(summary) => {
            println!("{}", serde_json::json!({ "total": summary.total, "by_state": summary.by_state }));
            Ok(())
        }
        Err(_) => Err(ExitError::new(1, format!("audit timed out after {}s", AUDIT_TIMEOUT.as_secs()))),
    }
}
