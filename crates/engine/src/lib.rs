// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Fleet Supervisor and Sprite Worker (spec.md §4.1, §4.2): the
//! reconciliation engine that drives every sprite's observed state toward
//! its desired state.

mod backoff;
mod cadence;
mod error;
mod supervisor;
mod worker;

pub use backoff::compute_backoff;
pub use cadence::{jitter, next_interval, roll_jitter, CadenceConfig, JITTER_FRACTION};
pub use error::EngineError;
pub use supervisor::{is_dormant, FleetSupervisor};
pub use worker::{SpriteWorker, WorkerConfig};
