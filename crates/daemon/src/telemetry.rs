// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Tracing subscriber setup: env-filter-controlled, JSON-formatted logs to
//! stdout, matching the teacher's daemon's structured-logging convention.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Call once at process startup.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).json().with_target(true).init();
}
