// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

use lattice_core::SpriteId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("sprite {0} not found")]
    NotFound(SpriteId),

    #[error("sprite {0} already exists")]
    AlreadyExists(SpriteId),

    #[error("worker for sprite {0} is dormant after exhausting its restart budget")]
    Dormant(SpriteId),
}
