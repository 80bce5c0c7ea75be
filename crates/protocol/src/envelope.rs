// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Protocol v1 envelope and its event-type payloads (spec.md §4.7).

use chrono::{DateTime, Utc};
use lattice_core::SpriteId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROTOCOL_VERSION: &str = "v1";

/// One sprite-emitted event, fully decoded from either the stdout stream or
/// the outbox file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolEvent {
    pub protocol_version: String,
    pub sprite_id: SpriteId,
    pub work_item_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl ProtocolEvent {
    pub fn new(
        sprite_id: SpriteId,
        work_item_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        payload: EventPayload,
    ) -> Self {
        Self { protocol_version: PROTOCOL_VERSION.to_string(), sprite_id, work_item_id: work_item_id.into(), timestamp, payload }
    }

    /// Reconciliation key (spec.md §4.7 "index of outbox events keyed by
    /// `(event_type, timestamp)`").
    pub fn reconcile_key(&self) -> (&'static str, DateTime<Utc>) {
        (self.payload.type_name(), self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Success,
    Failure,
}

/// Adjustment an `ENVIRONMENT_PROPOSAL` asks the control plane to consider.
/// Built-in kinds are named so the maintenance pipeline can pattern-match;
/// anything outside the allowlist still round-trips via `Custom`, matching
/// the tolerance `IntentKind` extends to unknown kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdjustmentType {
    EnvVar,
    DependencyVersion,
    Timeout,
    RetryPolicy,
    ResourceLimit,
    Custom(String),
}

impl AdjustmentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::EnvVar => "env_var",
            Self::DependencyVersion => "dependency_version",
            Self::Timeout => "timeout",
            Self::RetryPolicy => "retry_policy",
            Self::ResourceLimit => "resource_limit",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl From<&str> for AdjustmentType {
    fn from(s: &str) -> Self {
        match s {
            "env_var" => Self::EnvVar,
            "dependency_version" => Self::DependencyVersion,
            "timeout" => Self::Timeout,
            "retry_policy" => Self::RetryPolicy,
            "resource_limit" => Self::ResourceLimit,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl Serialize for AdjustmentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AdjustmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from(String::deserialize(deserializer)?.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAdjustment {
    #[serde(rename = "type")]
    pub kind: AdjustmentType,
    #[serde(default)]
    pub detail: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalScope {
    RepoSpecific,
    GlobalCandidate,
}

/// Event-type-specific payload. The envelope's `event_type` tag and
/// `payload` object are produced by flattening this enum (spec.md §4.7
/// envelope shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    Info {
        message: String,
        #[serde(default)]
        kind: Option<String>,
        #[serde(default)]
        metadata: Option<Value>,
    },
    PhaseStarted {
        phase: String,
    },
    PhaseFinished {
        phase: String,
        success: bool,
    },
    ActionRequest {
        action: String,
        parameters: Value,
        #[serde(default)]
        blocking: Option<bool>,
    },
    Artifact {
        kind: String,
        #[serde(default, rename = "ref")]
        reference: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        metadata: Option<Value>,
    },
    Waiting {
        #[serde(default)]
        reason: Option<String>,
        checkpoint_id: String,
        #[serde(default)]
        expected_inputs: Option<Value>,
    },
    Completed {
        status: CompletionStatus,
        #[serde(default)]
        summary: Option<String>,
    },
    Error {
        message: String,
        #[serde(default)]
        details: Option<Value>,
    },
    EnvironmentProposal {
        observed_failure: String,
        suggested_adjustment: SuggestedAdjustment,
        confidence: f64,
        evidence: Vec<String>,
        scope: ProposalScope,
    },
}

impl EventPayload {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Info { .. } => "INFO",
            Self::PhaseStarted { .. } => "PHASE_STARTED",
            Self::PhaseFinished { .. } => "PHASE_FINISHED",
            Self::ActionRequest { .. } => "ACTION_REQUEST",
            Self::Artifact { .. } => "ARTIFACT",
            Self::Waiting { .. } => "WAITING",
            Self::Completed { .. } => "COMPLETED",
            Self::Error { .. } => "ERROR",
            Self::EnvironmentProposal { .. } => "ENVIRONMENT_PROPOSAL",
        }
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
