// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Fleet Supervisor (spec.md §4.1): owns the set of sprite workers,
//! starts/restarts/shuts them down, and answers fleet queries without ever
//! blocking on worker work.

use crate::cadence::{next_interval, roll_jitter, CadenceConfig};
use crate::error::EngineError;
use crate::worker::{SpriteWorker, WorkerConfig};
use lattice_capability::SpritesCapability;
use lattice_core::{Clock, Event, FleetSummary, Sprite, SpriteId, SpriteSnapshot, SpriteState};
use lattice_eventbus::EventBus;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const RESTART_LIMIT: u32 = 5;
const RESTART_WINDOW: Duration = Duration::from_secs(60);
const MESSAGE_QUEUE_DEPTH: usize = 64;

/// Messages a worker task processes one at a time, in arrival order
/// (spec.md §4.2 "messages to the worker are queued and processed in
/// arrival order").
enum WorkerMessage {
    Reconcile(Option<oneshot::Sender<()>>),
    SetDesired(SpriteState),
    ViewersPresent(bool),
    Shutdown,
}

struct WorkerEntry {
    tx: mpsc::Sender<WorkerMessage>,
    snapshot: Arc<RwLock<SpriteSnapshot>>,
}

struct RestartTracker {
    count: u32,
    window_start: Instant,
    dormant: bool,
}

/// Owns every sprite worker by id (spec.md §4.1).
pub struct FleetSupervisor<C: Clock> {
    inner: Arc<Inner<C>>,
}

struct Inner<C: Clock> {
    capability: Arc<dyn SpritesCapability>,
    bus: Arc<EventBus>,
    clock: C,
    cadence: CadenceConfig,
    worker_config: WorkerConfig,
    workers: RwLock<HashMap<SpriteId, WorkerEntry>>,
    restarts: RwLock<HashMap<SpriteId, RestartTracker>>,
}

impl<C: Clock> Clone for FleetSupervisor<C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<C: Clock> FleetSupervisor<C> {
    pub fn new(capability: Arc<dyn SpritesCapability>, bus: Arc<EventBus>, clock: C, cadence: CadenceConfig, worker_config: WorkerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                capability,
                bus,
                clock,
                cadence,
                worker_config,
                workers: RwLock::new(HashMap::new()),
                restarts: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Start (or restart) a worker for `id` with the given configured
    /// desired state. No-op if a worker for `id` is already running.
    pub fn spawn(&self, id: SpriteId, desired: SpriteState) {
        self.inner.clone().spawn_worker(id, desired);
    }

    pub fn shutdown(&self, id: &SpriteId) {
        if let Some(entry) = self.inner.workers.write().remove(id) {
            let _ = entry.tx.try_send(WorkerMessage::Shutdown);
        }
    }

    /// Snapshot of every sprite's `{desired, observed, health}`. Never
    /// touches a worker's message channel (spec.md §4.1 "never blocks the
    /// caller on worker work").
    pub fn list(&self) -> Vec<SpriteSnapshot> {
        self.inner.workers.read().values().map(|entry| entry.snapshot.read().clone()).collect()
    }

    pub fn summary(&self) -> FleetSummary {
        Self::summarize(&self.list())
    }

    fn summarize(snapshots: &[SpriteSnapshot]) -> FleetSummary {
        let mut by_state: HashMap<String, usize> = HashMap::new();
        for snapshot in snapshots {
            *by_state.entry(snapshot.observed.to_string()).or_default() += 1;
        }
        FleetSummary { total: snapshots.len(), by_state }
    }

    pub fn lookup(&self, id: &SpriteId) -> Option<SpriteSnapshot> {
        self.inner.workers.read().get(id).map(|entry| entry.snapshot.read().clone())
    }

    /// Set desired state to `ready` on the named workers; returns
    /// `{id -> ok|error}` (spec.md §4.1 `wake`).
    pub async fn wake(&self, ids: &[SpriteId]) -> HashMap<SpriteId, Result<(), EngineError>> {
        self.set_desired(ids, SpriteState::Ready).await
    }

    pub async fn sleep(&self, ids: &[SpriteId]) -> HashMap<SpriteId, Result<(), EngineError>> {
        self.set_desired(ids, SpriteState::Hibernating).await
    }

    async fn set_desired(&self, ids: &[SpriteId], desired: SpriteState) -> HashMap<SpriteId, Result<(), EngineError>> {
        let mut results = HashMap::new();
        for id in ids {
            let outcome = match self.inner.workers.read().get(id).map(|e| e.tx.clone()) {
                Some(tx) => tx.send(WorkerMessage::SetDesired(desired)).await.map_err(|_| EngineError::Dormant(id.clone())),
                None => Err(EngineError::NotFound(id.clone())),
            };
            results.insert(id.clone(), outcome);
        }
        self.publish_summary();
        results
    }

    pub async fn set_viewers_present(&self, present: bool) {
        let senders: Vec<_> = self.inner.workers.read().values().map(|e| e.tx.clone()).collect();
        for tx in senders {
            let _ = tx.send(WorkerMessage::ViewersPresent(present)).await;
        }
    }

    /// Broadcast "reconcile now" to every worker and wait for one post-audit
    /// aggregate summary (spec.md §4.1 `run_audit`).
    pub async fn run_audit(&self) -> FleetSummary {
        let senders: Vec<_> = self.inner.workers.read().values().map(|e| e.tx.clone()).collect();
        let mut acks = Vec::with_capacity(senders.len());
        for tx in senders {
            let (ack_tx, ack_rx) = oneshot::channel();
            if tx.send(WorkerMessage::Reconcile(Some(ack_tx))).await.is_ok() {
                acks.push(ack_rx);
            }
        }
        for ack in acks {
            let _ = ack.await;
        }
        let summary = self.summary();
        self.inner.bus.publish(Event::FleetSummaryChanged { summary: summary.clone() });
        summary
    }

    fn publish_summary(&self) {
        let summary = self.summary();
        self.inner.bus.publish(Event::FleetSummaryChanged { summary });
    }
}

impl<C: Clock> Inner<C> {
    fn spawn_worker(self: Arc<Self>, id: SpriteId, desired: SpriteState) {
        if self.workers.read().contains_key(&id) {
            return;
        }
        let sprite = Sprite::new(id.clone(), desired);
        let snapshot = Arc::new(RwLock::new(SpriteSnapshot::from(&sprite)));
        let (tx, rx) = mpsc::channel(MESSAGE_QUEUE_DEPTH);
        self.workers.write().insert(id.clone(), WorkerEntry { tx, snapshot: snapshot.clone() });

        let handle = self.clone().run_worker_task(sprite, snapshot, rx);
        self.clone().monitor(id, desired, handle);
    }

    fn run_worker_task(self: Arc<Self>, sprite: Sprite, snapshot: Arc<RwLock<SpriteSnapshot>>, mut rx: mpsc::Receiver<WorkerMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = SpriteWorker::new(sprite, self.capability.clone(), self.bus.clone(), self.clock.clone(), self.worker_config);
            let mut viewers_present = false;
            loop {
                let interval = next_interval(viewers_present, &self.cadence, roll_jitter());
                tokio::select! {
                    message = rx.recv() => {
                        match message {
                            Some(WorkerMessage::Reconcile(ack)) => {
                                worker.tick(roll_jitter()).await;
                                *snapshot.write() = SpriteSnapshot::from(&worker.sprite);
                                if let Some(ack) = ack {
                                    let _ = ack.send(());
                                }
                            }
                            Some(WorkerMessage::SetDesired(desired)) => {
                                worker.sprite.desired = desired;
                            }
                            Some(WorkerMessage::ViewersPresent(present)) => {
                                viewers_present = present;
                            }
                            Some(WorkerMessage::Shutdown) | None => break,
                        }
                    }
                    _ = tokio::time::sleep(interval) => {
                        worker.tick(roll_jitter()).await;
                        *snapshot.write() = SpriteSnapshot::from(&worker.sprite);
                    }
                }
            }
        })
    }

    /// Await the worker task's completion and, on an unexpected panic,
    /// restart it one-for-one up to `RESTART_LIMIT` times per
    /// `RESTART_WINDOW` before going dormant (spec.md §4.1 supervision
    /// strategy).
    fn monitor(self: Arc<Self>, id: SpriteId, configured_desired: SpriteState, handle: JoinHandle<()>) {
        tokio::spawn(async move {
            let result = handle.await;
            let removed = self.workers.write().remove(&id).is_some();
            if result.is_ok() || !removed {
                // Clean shutdown, or already replaced by a fresh `spawn`: nothing to restart.
                return;
            }

            let should_restart = {
                let mut restarts = self.restarts.write();
                let tracker = restarts.entry(id.clone()).or_insert(RestartTracker {
                    count: 0,
                    window_start: self.clock.now(),
                    dormant: false,
                });
                if self.clock.now().duration_since(tracker.window_start) > RESTART_WINDOW {
                    tracker.count = 0;
                    tracker.window_start = self.clock.now();
                    tracker.dormant = false;
                }
                tracker.count += 1;
                if tracker.count > RESTART_LIMIT {
                    tracker.dormant = true;
                }
                !tracker.dormant
            };

            if should_restart {
                tracing::warn!(sprite_id = %id, "sprite worker crashed; restarting");
                self.spawn_worker(id, configured_desired);
            } else {
                tracing::error!(sprite_id = %id, "sprite worker exceeded restart budget; going dormant");
            }
        });
    }
}

/// Whether a supervisor-tracked sprite is currently dormant after exceeding
/// its restart budget. Exposed for tests and operational introspection.
pub fn is_dormant<C: Clock>(supervisor: &FleetSupervisor<C>, id: &SpriteId) -> bool {
    supervisor.inner.restarts.read().get(id).is_some_and(|t| t.dormant)
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
