// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! In-process topic pub/sub (spec.md §4.8).
//!
//! Each topic is backed by its own bounded broadcast channel so a slow
//! subscriber on one topic cannot starve another. Overflow on a subscriber's
//! queue drops the oldest undelivered events; the subscriber finds out on its
//! next `recv` and we log a warning, matching the "drop oldest with a
//! warning" policy spec.md §4.8 asks for.

use crate::topic;
use lattice_core::Event;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Per-subscriber queue depth before the broadcast channel starts dropping
/// the oldest unread event.
pub const DEFAULT_CAPACITY: usize = 256;

pub struct EventBus {
    capacity: usize,
    channels: RwLock<HashMap<String, broadcast::Sender<Event>>>,
    published_total: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, channels: RwLock::new(HashMap::new()), published_total: AtomicU64::new(0) }
    }

    /// Route an event to the topic(s) spec.md §4.8 assigns it.
    ///
    /// `IntentTransitioned` publishes to both `intents:all` and
    /// `intents:<id>`; every other event has a single home topic.
    pub fn publish(&self, event: Event) {
        match &event {
            Event::SpriteStateChanged { id, .. } => self.publish_to(&topic::sprite_topic(id.as_str()), event),
            Event::SpriteReconciled { result } => {
                self.publish_to(&topic::sprite_topic(result.sprite_id.as_str()), event)
            }
            Event::IntentTransitioned { intent, .. } => {
                let per_intent = topic::intent_topic(&intent.id.to_string());
                self.publish_to(topic::INTENTS_ALL, event.clone());
                self.publish_to(&per_intent, event);
            }
            _ => {
                let fixed = event.fixed_topic().expect("non-per-entity events carry a fixed topic");
                self.publish_to(fixed, event);
            }
        }
    }

    /// Publish directly to an arbitrary topic name, bypassing the routing
    /// `publish` derives from the event's variant. Used by callers that
    /// already know the destination (e.g. replaying a specific subscriber).
    pub fn publish_to(&self, topic: &str, event: Event) {
        self.published_total.fetch_add(1, Ordering::Relaxed);
        let sender = self.sender_for(topic);
        // An error here means no one is currently subscribed; per spec.md
        // §4.8 delivery is best-effort and we discard silently.
        let _ = sender.send(event);
    }

    pub fn subscribe(&self, topic: impl Into<String>) -> Subscription {
        let topic = topic.into();
        let inner = self.sender_for(&topic).subscribe();
        Subscription { topic, inner }
    }

    pub fn metrics(&self) -> BusMetrics {
        BusMetrics {
            published_total: self.published_total.load(Ordering::Relaxed),
            topic_count: self.channels.read().len(),
        }
    }

    fn sender_for(&self, topic: &str) -> broadcast::Sender<Event> {
        if let Some(sender) = self.channels.read().get(topic) {
            return sender.clone();
        }
        let mut channels = self.channels.write();
        channels.entry(topic.to_string()).or_insert_with(|| broadcast::channel(self.capacity).0).clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscriber-owned handle on one topic's queue.
pub struct Subscription {
    topic: String,
    inner: broadcast::Receiver<Event>,
}

impl Subscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Await the next event, transparently skipping past any gap left by a
    /// dropped-oldest overflow (and logging it).
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = %self.topic, skipped, "event bus subscriber lagged; oldest events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusMetrics {
    pub published_total: u64,
    pub topic_count: usize,
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
