// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Process wiring: construct every component (spec.md §2 dependency graph)
//! and hand the assembled state to the listener/webhook/cron surfaces.

use crate::config::Config;
use crate::dedup::DeliveryDedup;
use lattice_capability::{
    CapabilityRegistry, LiveFly, LiveGitHub, LiveSecretStore, LiveSprites, StubFly, StubGitHub,
    StubSecretStore, StubSprites,
};
use lattice_core::SystemClock;
use lattice_engine::FleetSupervisor;
use lattice_eventbus::EventBus;
use lattice_intent::{IntentPipeline, KvIntentStore};
use lattice_kv::InMemoryKvStore;
use lattice_safety::{GateConfig, InMemoryAuditLog};
use std::sync::Arc;

/// The assembled process, shared across the webhook handler, the cron
/// runner, and (eventually) the attach/query listener surface.
pub struct App {
    pub config: Config,
    pub bus: Arc<EventBus>,
    pub audit_log: Arc<InMemoryAuditLog>,
    pub capabilities: Arc<CapabilityRegistry>,
    pub intents: Arc<IntentPipeline>,
    pub dedup: Arc<DeliveryDedup>,
    pub clock: SystemClock,
}

impl App {
    /// Build the process from environment configuration (spec.md §6
    /// "capability-selection flags that auto-pick `live` vs `stub`" — here,
    /// presence of the relevant credentials does the selecting).
    pub fn from_config(config: Config, gate_config: GateConfig) -> Self {
        let bus = Arc::new(EventBus::new());
        let kv = Arc::new(InMemoryKvStore::new());
        let audit_log = Arc::new(InMemoryAuditLog::new());

        let sprites: Arc<dyn lattice_capability::SpritesCapability> = if config.has_live_sprites() {
            Arc::new(LiveSprites::new(
                config.sprites_api_base.clone().unwrap_or_default(),
                config.sprites_api_token.clone().unwrap_or_default(),
            ))
        } else {
            Arc::new(StubSprites::new())
        };
        let github: Arc<dyn lattice_capability::GitHubCapability> = if config.has_live_github() {
            Arc::new(LiveGitHub::new(config.github_token.clone().unwrap_or_default()))
        } else {
            Arc::new(StubGitHub::new())
        };
        let fly: Arc<dyn lattice_capability::FlyCapability> = if config.has_live_fly() {
            Arc::new(LiveFly::new(config.fly_token.clone().unwrap_or_default()))
        } else {
            Arc::new(StubFly::new())
        };
        let secret_store: Arc<dyn lattice_capability::SecretStoreCapability> = Arc::new(LiveSecretStore::from_env([
            "SPRITES_API_TOKEN",
            "GITHUB_TOKEN",
            "FLY_API_TOKEN",
            "GITHUB_WEBHOOK_SECRET",
            "CLERK_SECRET_KEY",
            "DATABASE_URL",
            "SECRET_KEY_BASE",
        ]));

        let capabilities = Arc::new(CapabilityRegistry::new(sprites, github, fly, secret_store));
        let intent_store = Arc::new(KvIntentStore::new(kv, bus.clone()));
        let intents = Arc::new(IntentPipeline::new(intent_store, gate_config));

        let dedup = Arc::new(DeliveryDedup::default());

        Self { config, bus, audit_log, capabilities, intents, dedup, clock: SystemClock }
    }

    /// Build a Fleet Supervisor wired to this process's sprites capability,
    /// bus, and wall clock, tuned by the cadence/backoff env vars in
    /// [`Config`]. No sprites are spawned yet; the caller (`lattice serve`,
    /// `lattice audit`, `lattice cron`) decides what to spawn.
    pub fn fleet_supervisor(&self) -> FleetSupervisor<SystemClock> {
        FleetSupervisor::new(
            self.capabilities.sprites(),
            self.bus.clone(),
            SystemClock,
            self.config.cadence(),
            self.config.worker_config(),
        )
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
