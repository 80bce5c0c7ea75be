// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Sprite Worker reconciliation loop (spec.md §4.2): the central
//! algorithm that drives one sprite's observed state toward its desired
//! state.

use crate::backoff::compute_backoff;
use crate::cadence::JITTER_FRACTION;
use lattice_capability::{CapabilityError, SpritesCapability};
use lattice_core::{Clock, Event, Health, InflightOp, ReconcileOutcome, ReconciliationResult, Sprite, SpriteState};
use lattice_eventbus::EventBus;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub degraded_threshold: u32,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_cap_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { degraded_threshold: 3, max_retries: 8, backoff_base_ms: 1_000, backoff_cap_ms: 60_000 }
    }
}

/// Owns one sprite's reconciliation state exclusively (spec.md §4.2 "no
/// shared mutable state between workers").
pub struct SpriteWorker<C: Clock> {
    pub sprite: Sprite,
    capability: Arc<dyn SpritesCapability>,
    bus: Arc<EventBus>,
    clock: C,
    config: WorkerConfig,
}

impl<C: Clock> SpriteWorker<C> {
    pub fn new(sprite: Sprite, capability: Arc<dyn SpritesCapability>, bus: Arc<EventBus>, clock: C, config: WorkerConfig) -> Self {
        Self { sprite, capability, bus, clock, config }
    }

    /// Run one reconciliation cycle (spec.md §4.2 steps 2-6). `jitter_roll`
    /// drives the backoff jitter for this cycle's failure, if any.
    pub async fn tick(&mut self, jitter_roll: f64) -> ReconciliationResult {
        let started = self.clock.now();
        let from_state = self.sprite.observed;

        if self.sprite.is_backing_off(started) {
            return self.emit(from_state, from_state, started, ReconcileOutcome::Skipped);
        }

        match self.capability.get(self.sprite.id.as_str()).await {
            Ok(record) => {
                let observed = record.observed_state();
                self.sprite.observed = observed;
                self.reconcile_observed(from_state, observed, started, jitter_roll).await
            }
            Err(err) => {
                self.record_failure(&err, jitter_roll);
                self.emit(from_state, from_state, started, ReconcileOutcome::Failed)
            }
        }
    }

    async fn reconcile_observed(
        &mut self,
        from_state: SpriteState,
        observed: SpriteState,
        started: std::time::Instant,
        jitter_roll: f64,
    ) -> ReconciliationResult {
        if self.sprite.converged() {
            self.sprite.health = Health::Ok;
            self.sprite.failure_count = 0;
            self.sprite.backoff_until = None;
            self.sprite.inflight_op = None;
            return self.emit(from_state, observed, started, ReconcileOutcome::Converged);
        }

        if self.sprite.inflight_op.is_some() {
            self.sprite.health = Health::Converging;
            return self.emit(from_state, observed, started, ReconcileOutcome::Skipped);
        }

        self.sprite.health = Health::Converging;
        let op = if self.sprite.desired == SpriteState::Ready { InflightOp::Wake } else { InflightOp::Sleep };
        self.sprite.inflight_op = Some(op);

        let call_result = match op {
            InflightOp::Wake => self.capability.wake(self.sprite.id.as_str()).await,
            InflightOp::Sleep => self.capability.sleep(self.sprite.id.as_str()).await,
        };
        self.sprite.inflight_op = None;

        match call_result {
            Ok(()) => {
                self.sprite.failure_count = 0;
                self.sprite.backoff_until = None;
                self.emit(from_state, observed, started, ReconcileOutcome::Dispatched)
            }
            Err(err) => {
                self.record_failure(&err, jitter_roll);
                self.emit(from_state, observed, started, ReconcileOutcome::Failed)
            }
        }
    }

    fn record_failure(&mut self, err: &CapabilityError, jitter_roll: f64) {
        self.sprite.failure_count += 1;
        let delay = compute_backoff(
            self.sprite.failure_count,
            std::time::Duration::from_millis(self.config.backoff_base_ms),
            std::time::Duration::from_millis(self.config.backoff_cap_ms),
            JITTER_FRACTION,
            jitter_roll,
        );
        self.sprite.current_delay = delay;
        self.sprite.backoff_until = Some(self.clock.now() + delay);

        if self.sprite.failure_count > self.config.max_retries {
            self.sprite.health = Health::Error;
        } else if self.sprite.failure_count >= self.config.degraded_threshold {
            self.sprite.health = Health::Degraded;
        }

        tracing::warn!(
            sprite_id = %self.sprite.id,
            failure_count = self.sprite.failure_count,
            backoff_ms = delay.as_millis() as u64,
            error = %err,
            "sprite reconciliation failed"
        );
    }

    fn emit(
        &self,
        from_state: SpriteState,
        to_state: SpriteState,
        started: std::time::Instant,
        outcome: ReconcileOutcome,
    ) -> ReconciliationResult {
        let duration_ms = self.clock.now().saturating_duration_since(started).as_millis() as u64;
        let result = ReconciliationResult { sprite_id: self.sprite.id.clone(), from_state, to_state, duration_ms, outcome };
        self.bus.publish(Event::SpriteReconciled { result: result.clone() });
        self.bus.publish(Event::SpriteStateChanged {
            id: self.sprite.id.clone(),
            desired: self.sprite.desired,
            observed: self.sprite.observed,
            health: self.sprite.health,
        });
        result
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
