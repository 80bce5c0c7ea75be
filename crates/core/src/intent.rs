// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Intent entity (spec.md §3) — the durable unit of proposed work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

crate::define_id! {
    /// Collision-resistant, url-safe identifier for an intent.
    pub struct IntentId("int_");
}

/// Extensible tag set for the kind of work an intent represents.
///
/// Built-in kinds are named variants so the classifier and pipeline can
/// pattern-match on them directly; anything else round-trips through
/// `Custom` so new kinds don't require a schema migration. Serializes as a
/// plain string, matching the wire shape of a fixed enum while tolerating
/// unknown tags — the same tolerance `Event`'s `#[serde(tag = "type")]`
/// gives unknown event names in `lattice-protocol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    Action,
    Inquiry,
    Maintenance,
    IssueTriage,
    PrCreate,
    PrFixup,
    HealthDetect,
    HealthRemediate,
    DocUpdate,
    Task,
    Custom(String),
}

impl IntentKind {
    /// Built-in kinds that skip classification entirely (spec.md §4.4 step 2).
    pub fn default_classification(&self) -> Option<Classification> {
        match self {
            IntentKind::Inquiry => Some(Classification::Safe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IntentKind::Action => "action",
            IntentKind::Inquiry => "inquiry",
            IntentKind::Maintenance => "maintenance",
            IntentKind::IssueTriage => "issue_triage",
            IntentKind::PrCreate => "pr_create",
            IntentKind::PrFixup => "pr_fixup",
            IntentKind::HealthDetect => "health_detect",
            IntentKind::HealthRemediate => "health_remediate",
            IntentKind::DocUpdate => "doc_update",
            IntentKind::Task => "task",
            IntentKind::Custom(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for IntentKind {
    fn from(s: &str) -> Self {
        match s {
            "action" => IntentKind::Action,
            "inquiry" => IntentKind::Inquiry,
            "maintenance" => IntentKind::Maintenance,
            "issue_triage" => IntentKind::IssueTriage,
            "pr_create" => IntentKind::PrCreate,
            "pr_fixup" => IntentKind::PrFixup,
            "health_detect" => IntentKind::HealthDetect,
            "health_remediate" => IntentKind::HealthRemediate,
            "doc_update" => IntentKind::DocUpdate,
            "task" => IntentKind::Task,
            other => IntentKind::Custom(other.to_string()),
        }
    }
}

impl Serialize for IntentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IntentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(IntentKind::from(s.as_str()))
    }
}

/// The intent state machine's state alphabet (spec.md §3, §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentState {
    Proposed,
    Classified,
    AwaitingApproval,
    Approved,
    Running,
    Blocked,
    WaitingForInput,
    Completed,
    Failed,
    Rejected,
    Canceled,
}

crate::simple_display! {
    IntentState {
        Proposed => "proposed",
        Classified => "classified",
        AwaitingApproval => "awaiting_approval",
        Approved => "approved",
        Running => "running",
        Blocked => "blocked",
        WaitingForInput => "waiting_for_input",
        Completed => "completed",
        Failed => "failed",
        Rejected => "rejected",
        Canceled => "canceled",
    }
}

impl IntentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Rejected | Self::Canceled)
    }
}

/// Safety level assigned by the Classifier (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Safe,
    Controlled,
    Dangerous,
}

crate::simple_display! {
    Classification {
        Safe => "safe",
        Controlled => "controlled",
        Dangerous => "dangerous",
    }
}

/// Who or what raised the intent (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Sprite,
    Agent,
    Cron,
    Operator,
    Webhook,
}

crate::simple_display! {
    SourceType {
        Sprite => "sprite",
        Agent => "agent",
        Cron => "cron",
        Operator => "operator",
        Webhook => "webhook",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSource {
    #[serde(rename = "type")]
    pub kind: SourceType,
    pub id: String,
}

impl IntentSource {
    pub fn new(kind: SourceType, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

/// One append-only entry in an intent's transition log (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: IntentState,
    pub to: IntentState,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub reason: Option<String>,
}

/// The durable unit of proposed work (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub kind: IntentKind,
    pub state: IntentState,
    pub classification: Option<Classification>,
    pub source: IntentSource,
    pub summary: String,
    pub payload: serde_json::Map<String, Value>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub affected_resources: Vec<String>,
    #[serde(default)]
    pub expected_side_effects: Vec<String>,
    pub rollback_strategy: Option<String>,
    pub plan: Option<String>,
    pub parent_intent_id: Option<IntentId>,

    #[serde(default)]
    pub transition_log: Vec<Transition>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub classified_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub blocked_at: Option<DateTime<Utc>>,
    pub resumed_at: Option<DateTime<Utc>>,
}

impl Intent {
    /// Build a fresh, unclassified intent in state `proposed` (spec.md §4.4 step 1).
    pub fn propose(
        kind: IntentKind,
        source: IntentSource,
        summary: impl Into<String>,
        payload: serde_json::Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: IntentId::new(),
            kind,
            state: IntentState::Proposed,
            classification: None,
            source,
            summary: summary.into(),
            payload,
            metadata: HashMap::new(),
            affected_resources: Vec::new(),
            expected_side_effects: Vec::new(),
            rollback_strategy: None,
            plan: None,
            parent_intent_id: None,
            transition_log: Vec::new(),
            created_at: now,
            updated_at: now,
            classified_at: None,
            approved_at: None,
            started_at: None,
            completed_at: None,
            blocked_at: None,
            resumed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
