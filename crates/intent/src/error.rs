// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

use lattice_core::{IntentId, IntentState};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("intent {0} not found")]
    NotFound(IntentId),

    #[error("intent {0} already exists")]
    Collision(IntentId),

    #[error("terminal intent {0} cannot be mutated")]
    Terminal(IntentId),

    #[error("illegal transition {from} -> {to}")]
    InvalidTransition { from: IntentState, to: IntentState },

    #[error("intent {0} failed to (de)serialize")]
    Corrupt(IntentId),
}
