// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Resume-file writer (spec.md §4.7): restores a paused sprite's checkpoint
//! by handing it `/workspace/.lattice/resume.json` before re-exec'ing.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub const RESUME_FILE_PATH: &str = ".lattice/resume.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRequest {
    pub work_item_id: String,
    pub checkpoint_id: String,
    #[serde(default)]
    pub inputs: Value,
    #[serde(default)]
    pub context: Value,
}

impl ResumeRequest {
    pub fn new(
        work_item_id: impl Into<String>,
        checkpoint_id: impl Into<String>,
        inputs: Value,
        context: Value,
    ) -> Self {
        Self { work_item_id: work_item_id.into(), checkpoint_id: checkpoint_id.into(), inputs, context }
    }

    /// Write the resume file to `workspace_root/.lattice/resume.json`.
    pub fn write_to(&self, workspace_root: &Path) -> Result<(), ProtocolError> {
        let lattice_dir = workspace_root.join(".lattice");
        std::fs::create_dir_all(&lattice_dir)?;
        let body = serde_json::to_vec_pretty(self)?;
        std::fs::write(lattice_dir.join("resume.json"), body)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
