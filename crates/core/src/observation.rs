// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Observation entity (spec.md §3) — a sprite-emitted fact about the
//! world, feeding the Intent Pipeline via the health subsystem.

use crate::sprite::SpriteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Metric,
    Anomaly,
    Status,
    Recommendation,
}

crate::simple_display! {
    ObservationKind {
        Metric => "metric",
        Anomaly => "anomaly",
        Status => "status",
        Recommendation => "recommendation",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

crate::simple_display! {
    Severity {
        Info => "info",
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub sprite_id: SpriteId,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
    pub severity: Severity,
    pub data: Value,
    pub observed_at: DateTime<Utc>,
}
