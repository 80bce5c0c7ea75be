// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Intent Pipeline (spec.md §4.4): move a `proposed` intent forward
//! through classify → gate → `approved` (or a rejection along the way).

use crate::error::IntentError;
use crate::store::{IntentStore, IntentUpdate};
use chrono::{DateTime, Utc};
use lattice_core::{Classification, Intent, IntentId, IntentKind, IntentSource};
use lattice_safety::{classify, decide, GateConfig, GateContext, GateDecision};
use serde_json::Map;
use std::sync::Arc;

/// Reason stamped on an intent rejected at the classifier (spec.md §4.4
/// "Errors: classification failure on an unknown capability/operation
/// transitions to rejected with reason unknown_action").
pub const REASON_UNKNOWN_ACTION: &str = "unknown_action";

/// Reason stamped on an intent the Gate denies (spec.md §4.4 step 3,
/// "dangerous with allow_dangerous=false -> transition to rejected with
/// reason policy_denied"). The Gate's own free-text reason is preserved
/// separately as a metadata entry rather than lost.
pub const REASON_POLICY_DENIED: &str = "policy_denied";

const METADATA_GATE_REASON: &str = "gate_reason";

pub struct IntentPipeline {
    store: Arc<dyn IntentStore>,
    config: GateConfig,
}

impl IntentPipeline {
    pub fn new(store: Arc<dyn IntentStore>, config: GateConfig) -> Self {
        Self { store, config }
    }

    /// Step 1: `propose(intent)` — create in store (spec.md §4.4).
    pub async fn propose(
        &self,
        kind: IntentKind,
        source: IntentSource,
        summary: impl Into<String>,
        payload: Map<String, serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<Intent, IntentError> {
        let intent = Intent::propose(kind, source, summary, payload, now);
        self.store.create(intent.clone()).await?;
        Ok(intent)
    }

    /// Steps 2-3: classify then gate a `proposed` intent, driving it to
    /// `approved`, `awaiting_approval`, or `rejected`. `local_hour` is the
    /// caller's current hour on the local clock, for the Gate's
    /// `time_gate` policy rule.
    pub async fn classify_and_gate(&self, id: &IntentId, local_hour: u32, now: DateTime<Utc>) -> Result<Intent, IntentError> {
        let intent = self.store.get(id).await?;
        let classification = Self::classification_for(&intent);

        let mut update = IntentUpdate::to_state(lattice_core::IntentState::Classified);
        if let Some(c) = classification {
            update = update.with_classification(c);
        }
        let classified = self.store.update(id, update, "pipeline", None, now).await?;

        let repo = classified.payload.get("repo").and_then(|v| v.as_str());
        let ctx = GateContext {
            classification,
            affected_resources: &classified.affected_resources,
            repo,
            local_hour,
        };
        let decision = decide(&ctx, &self.config);

        match decision {
            GateDecision::Allow => {
                let update = IntentUpdate::to_state(lattice_core::IntentState::Approved);
                self.store.update(id, update, "pipeline", None, now).await
            }
            GateDecision::RequireApproval => {
                let update = IntentUpdate::to_state(lattice_core::IntentState::AwaitingApproval);
                self.store.update(id, update, "pipeline", None, now).await
            }
            GateDecision::Deny { reason } => {
                let canonical = if classification.is_none() { REASON_UNKNOWN_ACTION } else { REASON_POLICY_DENIED };
                let update = IntentUpdate::to_state(lattice_core::IntentState::Rejected)
                    .with_metadata(METADATA_GATE_REASON, reason.clone());
                self.store.update(id, update, "pipeline", Some(canonical.to_string()), now).await
            }
        }
    }

    fn classification_for(intent: &Intent) -> Option<Classification> {
        if let Some(default) = intent.kind.default_classification() {
            return Some(default);
        }
        let capability = intent.payload.get("capability").and_then(|v| v.as_str())?;
        let operation = intent.payload.get("operation").and_then(|v| v.as_str())?;
        classify(capability, operation)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
