// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The default [`IntentStore`] implementation, built on top of `lattice-kv`
//! exactly as spec.md §4.9 describes it: "The store is a side-effect-free
//! collaborator for Intent Store and others." This crate owns the domain
//! rules (state-machine enforcement, phase timestamps, event publication);
//! `lattice-kv` just durably holds the JSON.

use crate::error::IntentError;
use crate::lifecycle::apply_transition;
use crate::store::{IntentFilters, IntentStore, IntentUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lattice_core::{Event, Intent, IntentId};
use lattice_eventbus::EventBus;
use lattice_kv::{KvStore, Namespace};
use std::sync::Arc;

pub struct KvIntentStore {
    kv: Arc<dyn KvStore>,
    bus: Arc<EventBus>,
}

impl KvIntentStore {
    pub fn new(kv: Arc<dyn KvStore>, bus: Arc<EventBus>) -> Self {
        Self { kv, bus }
    }

    async fn load(&self, id: &IntentId) -> Result<Intent, IntentError> {
        let value = self.kv.get(Namespace::Intents, id.as_str()).await.map_err(|_| IntentError::NotFound(id.clone()))?;
        serde_json::from_value(value).map_err(|_| IntentError::Corrupt(id.clone()))
    }

    async fn save(&self, intent: &Intent) -> Result<(), IntentError> {
        let value = serde_json::to_value(intent).map_err(|_| IntentError::Corrupt(intent.id.clone()))?;
        self.kv.put(Namespace::Intents, intent.id.as_str(), value).await.map_err(|_| IntentError::Corrupt(intent.id.clone()))
    }

    fn apply_field_updates(intent: &mut Intent, update: &IntentUpdate) {
        if let Some(classification) = update.classification {
            intent.classification = Some(classification);
        }
        if let Some(plan) = &update.plan {
            intent.plan = Some(plan.clone());
        }
        if let Some(rollback_strategy) = &update.rollback_strategy {
            intent.rollback_strategy = Some(rollback_strategy.clone());
        }
        if let Some(affected_resources) = &update.affected_resources {
            intent.affected_resources = affected_resources.clone();
        }
        if let Some(expected_side_effects) = &update.expected_side_effects {
            intent.expected_side_effects = expected_side_effects.clone();
        }
        if let Some((key, value)) = &update.metadata {
            intent.metadata.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl IntentStore for KvIntentStore {
    async fn create(&self, intent: Intent) -> Result<(), IntentError> {
        if intent.state.is_terminal() {
            return Err(IntentError::Terminal(intent.id.clone()));
        }
        if self.kv.get(Namespace::Intents, intent.id.as_str()).await.is_ok() {
            return Err(IntentError::Collision(intent.id.clone()));
        }
        self.save(&intent).await
    }

    async fn get(&self, id: &IntentId) -> Result<Intent, IntentError> {
        self.load(id).await
    }

    async fn update(
        &self,
        id: &IntentId,
        update: IntentUpdate,
        actor: &str,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Intent, IntentError> {
        let mut intent = self.load(id).await?;
        let from = intent.state;

        if intent.state.is_terminal() {
            return Err(IntentError::Terminal(intent.id.clone()));
        }

        Self::apply_field_updates(&mut intent, &update);
        if let Some(to_state) = update.to_state {
            apply_transition(&mut intent, to_state, actor, reason, now)?;
        } else {
            intent.updated_at = now;
        }

        self.save(&intent).await?;

        if let Some(to_state) = update.to_state {
            self.bus.publish(Event::IntentTransitioned { intent: Box::new(intent.clone()), from, to: to_state });
            tracing::info!(intent_id = %intent.id, %from, to = %to_state, "intent transitioned");
        }

        Ok(intent)
    }

    async fn list(&self, filters: &IntentFilters) -> Vec<Intent> {
        let values = self.kv.list(Namespace::Intents).await;
        let intents: Vec<Intent> = values.into_iter().filter_map(|v| serde_json::from_value(v).ok()).collect();
        filters.apply(&intents)
    }

    async fn delete(&self, id: &IntentId) -> Result<(), IntentError> {
        self.kv.delete(Namespace::Intents, id.as_str()).await.map_err(|_| IntentError::NotFound(id.clone()))
    }
}

#[cfg(test)]
#[path = "kv_store_tests.rs"]
mod tests;
