// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Intent Store contract (spec.md §4.3): durable storage plus
//! state-machine-enforced updates. `lattice-kv` is a side-effect-free
//! collaborator here, exactly as spec.md §4.9 describes it — the Store is
//! the domain-aware layer on top.

use crate::error::IntentError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lattice_core::{Classification, Intent, IntentId, IntentKind, IntentState, SourceType};

/// Field changes bundled with a state transition (spec.md §4.3
/// `update(id, changes)`). `to_state` is optional because not every update
/// changes state (the classifier sets `classification` as part of the same
/// atomic step that transitions `proposed -> classified`, but a caller could
/// also patch a field like `plan` without moving the state machine).
#[derive(Debug, Clone, Default)]
pub struct IntentUpdate {
    pub to_state: Option<IntentState>,
    pub classification: Option<Classification>,
    pub plan: Option<String>,
    pub rollback_strategy: Option<String>,
    pub affected_resources: Option<Vec<String>>,
    pub expected_side_effects: Option<Vec<String>>,
    /// Free-form diagnostic detail merged into `Intent::metadata`, e.g. the
    /// Gate's specific denial reason behind a `policy_denied` transition.
    pub metadata: Option<(String, String)>,
}

impl IntentUpdate {
    pub fn to_state(to_state: IntentState) -> Self {
        Self { to_state: Some(to_state), ..Default::default() }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata = Some((key.into(), value.into()));
        self
    }
}

/// Filters for `list()` (spec.md §4.3 "filters by kind, state, source type,
/// classification, parent-intent-id").
#[derive(Debug, Clone, Default)]
pub struct IntentFilters {
    pub kind: Option<IntentKind>,
    pub state: Option<IntentState>,
    pub source_type: Option<SourceType>,
    pub classification: Option<Classification>,
    pub parent_intent_id: Option<IntentId>,
}

impl IntentFilters {
    fn matches(&self, intent: &Intent) -> bool {
        self.kind.as_ref().map_or(true, |k| k == &intent.kind)
            && self.state.map_or(true, |s| s == intent.state)
            && self.source_type.map_or(true, |t| t == intent.source.kind)
            && self.classification.map_or(true, |c| Some(c) == intent.classification)
            && self.parent_intent_id.as_ref().map_or(true, |id| Some(id) == intent.parent_intent_id.as_ref())
    }

    pub fn apply<'a>(&self, intents: impl IntoIterator<Item = &'a Intent>) -> Vec<Intent> {
        intents.into_iter().filter(|intent| self.matches(intent)).cloned().collect()
    }
}

#[async_trait]
pub trait IntentStore: Send + Sync {
    async fn create(&self, intent: Intent) -> Result<(), IntentError>;
    async fn get(&self, id: &IntentId) -> Result<Intent, IntentError>;
    async fn update(
        &self,
        id: &IntentId,
        update: IntentUpdate,
        actor: &str,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Intent, IntentError>;
    async fn list(&self, filters: &IntentFilters) -> Vec<Intent>;
    /// Test-only: production intents are immutable after a terminal state.
    async fn delete(&self, id: &IntentId) -> Result<(), IntentError>;
}
