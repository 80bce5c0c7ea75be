// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Capability Action entity (spec.md §3) — a pure descriptor produced by
//! the Classifier, consumed by the Gate and Audit.

use crate::intent::Classification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAction {
    pub capability: String,
    pub operation: String,
    pub classification: Classification,
}

impl CapabilityAction {
    pub fn new(
        capability: impl Into<String>,
        operation: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self { capability: capability.into(), operation: operation.into(), classification }
    }
}
