// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Domain events published on the event bus (spec.md §4.8).
//!
//! Serializes with `{"type": "event:name", ...fields}`, matching the
//! teacher's `oj-core::event::Event` tagged-enum convention.

use crate::audit::AuditEntry;
use crate::intent::{Intent, IntentState};
use crate::observation::Observation;
use crate::sprite::{Health, SpriteId, SpriteSnapshot, SpriteState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of one reconciliation cycle (spec.md §4.2 step 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    Converged,
    Dispatched,
    Skipped,
    Failed,
}

crate::simple_display! {
    ReconcileOutcome {
        Converged => "converged",
        Dispatched => "dispatched",
        Skipped => "skipped",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub sprite_id: SpriteId,
    pub from_state: SpriteState,
    pub to_state: SpriteState,
    pub duration_ms: u64,
    pub outcome: ReconcileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub by_state: HashMap<String, usize>,
}

/// Events published on the event bus's named topics (spec.md §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Published on `sprites:fleet` after every fleet-mutating action.
    #[serde(rename = "fleet:summary")]
    FleetSummaryChanged { summary: FleetSummary },

    /// Published on `sprites:<id>` on every desired/observed state change.
    #[serde(rename = "sprite:state_changed")]
    SpriteStateChanged { id: SpriteId, desired: SpriteState, observed: SpriteState, health: Health },

    /// Published on `sprites:<id>` after every reconciliation cycle.
    #[serde(rename = "sprite:reconciled")]
    SpriteReconciled { result: ReconciliationResult },

    /// Published on `intents:all` and `intents:<id>` on every transition.
    #[serde(rename = "intent:transitioned")]
    IntentTransitioned { intent: Box<Intent>, from: IntentState, to: IntentState },

    /// Published on `safety:audit` for every capability dispatch.
    #[serde(rename = "safety:audit")]
    AuditRecorded { entry: Box<AuditEntry> },

    /// Published on `observations:all` for every sprite-emitted observation.
    #[serde(rename = "observation:recorded")]
    ObservationRecorded { observation: Box<Observation> },
}

impl Event {
    /// Which fixed topic this event belongs to (spec.md §4.8), or `None` for
    /// per-entity topics (`sprites:<id>`, `intents:<id>`) the publisher
    /// names explicitly.
    pub fn fixed_topic(&self) -> Option<&'static str> {
        match self {
            Event::FleetSummaryChanged { .. } => Some("sprites:fleet"),
            Event::AuditRecorded { .. } => Some("safety:audit"),
            Event::ObservationRecorded { .. } => Some("observations:all"),
            Event::IntentTransitioned { .. } => Some("intents:all"),
            Event::SpriteStateChanged { .. } | Event::SpriteReconciled { .. } => None,
        }
    }

    pub fn sprite_snapshot(id: &SpriteId, desired: SpriteState, observed: SpriteState, health: Health) -> SpriteSnapshot {
        SpriteSnapshot { id: id.clone(), desired, observed, health }
    }
}
