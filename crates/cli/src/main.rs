// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! `lattice`: the control-plane binary (spec.md §6 "CLI").

mod commands;
mod exit_error;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lattice", version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover the fleet, start reconciliation workers, and serve the
    /// GitHub webhook until killed.
    Serve,
    /// Run a fleet-wide reconcile and wait for the aggregate summary.
    Audit,
    /// Run the scheduled maintenance pass: fleet audit, credential sync,
    /// skill sync.
    Cron,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve => commands::serve::run().await,
        Command::Audit => commands::audit::run().await,
        Command::Cron => commands::cron::run().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.code as u8)
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
