// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! `lattice` command implementations (spec.md §6 "CLI").

pub mod audit;
pub mod cron;
pub mod serve;

use lattice_daemon::{load_gate_config, App, Config};
use std::path::Path;

/// Build the process from the environment and an optional `lattice.toml`
/// policy file, the way every subcommand does it.
pub fn build_app() -> Result<App, crate::exit_error::ExitError> {
    let config = Config::from_env();
    let gate_config = load_gate_config(Path::new("lattice.toml"))
        .map_err(|e| crate::exit_error::ExitError::new(1, format!("failed to load policy: {e}")))?;
    Ok(App::from_config(config, gate_config))
}
