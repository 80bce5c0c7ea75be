// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Run entity (spec.md §3) — the execution record of an approved intent
//! on a sprite.

use crate::intent::IntentId;
use crate::sprite::SpriteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

crate::define_id! {
    pub struct RunId("run_");
}

/// How the command is dispatched to the sprite. Both modes are kept as
/// distinct, caller-selected variants per spec.md §9's open question on
/// `exec_ws` vs `exec_post` — no default-selection policy is invented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    ExecWs,
    ExecPost,
    Service,
}

crate::simple_display! {
    RunMode {
        ExecWs => "exec_ws",
        ExecPost => "exec_post",
        Service => "service",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Blocked,
    Waiting,
}

crate::simple_display! {
    RunStatus {
        Pending => "pending",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Canceled => "canceled",
        Blocked => "blocked",
        Waiting => "waiting",
    }
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    pub intent_id: IntentId,
    pub sprite_id: SpriteId,
    pub command: String,
    pub mode: RunMode,
    pub status: RunStatus,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
    #[serde(default)]
    pub artifacts: HashMap<String, Value>,
    /// Checkpoint remembered from a `WAITING` protocol event (spec.md §4.7).
    pub checkpoint_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Run {
    pub fn new(intent_id: IntentId, sprite_id: SpriteId, command: impl Into<String>, mode: RunMode) -> Self {
        Self {
            id: RunId::new(),
            intent_id,
            sprite_id,
            command: command.into(),
            mode,
            status: RunStatus::Pending,
            exit_code: None,
            error: None,
            artifacts: HashMap::new(),
            checkpoint_id: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Merge an artifact under `kind` (spec.md §4.7 `ARTIFACT` event effect).
    pub fn record_artifact(&mut self, kind: impl Into<String>, value: Value) {
        self.artifacts.insert(kind.into(), value);
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
