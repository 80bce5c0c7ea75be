// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed event JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown protocol_version {0:?}")]
    UnsupportedVersion(String),

    #[error("failed to write resume file: {0}")]
    ResumeWrite(#[from] std::io::Error),
}
