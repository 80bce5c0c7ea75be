// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KvError {
    #[error("key not found: {namespace}/{key}")]
    NotFound { namespace: String, key: String },
}
