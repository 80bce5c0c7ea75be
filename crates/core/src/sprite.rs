// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Sprite entity (spec.md §3) — one managed remote agent.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Stable identifier for a sprite, assigned by configuration rather than
/// generated — unlike [`crate::define_id!`]-based ids, arbitrary-length
/// config names must round-trip exactly, so this wraps a plain `String`
/// instead of the fixed-capacity `IdBuf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub String);

impl SpriteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpriteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SpriteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for SpriteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state alphabet shared by desired and observed state (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteState {
    Hibernating,
    Waking,
    Ready,
    Busy,
    Error,
}

crate::simple_display! {
    SpriteState {
        Hibernating => "hibernating",
        Waking => "waking",
        Ready => "ready",
        Busy => "busy",
        Error => "error",
    }
}

/// Derived health, computed from reconciliation history (spec.md §3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Ok,
    Converging,
    Degraded,
    Error,
}

crate::simple_display! {
    Health {
        Ok => "ok",
        Converging => "converging",
        Degraded => "degraded",
        Error => "error",
    }
}

/// In-flight capability call recorded on a sprite so a worker never issues a
/// duplicate wake/sleep while one is already outstanding (spec.md §4.2 step 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflightOp {
    Wake,
    Sleep,
}

/// Per-sprite state owned exclusively by that sprite's worker (spec.md §3).
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pub desired: SpriteState,
    pub observed: SpriteState,
    pub health: Health,
    pub failure_count: u32,
    pub backoff_until: Option<Instant>,
    pub current_delay: Duration,
    pub inflight_op: Option<InflightOp>,
}

impl Sprite {
    pub fn new(id: SpriteId, desired: SpriteState) -> Self {
        Self {
            id,
            desired,
            observed: SpriteState::Hibernating,
            health: Health::Converging,
            failure_count: 0,
            backoff_until: None,
            current_delay: Duration::ZERO,
            inflight_op: None,
        }
    }

    /// Whether observed has converged to desired.
    pub fn converged(&self) -> bool {
        self.desired == self.observed
    }

    pub fn is_backing_off(&self, at: Instant) -> bool {
        self.backoff_until.is_some_and(|until| until > at)
    }
}

/// Snapshot of one sprite's state for fleet queries (spec.md §4.1 `list()`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSnapshot {
    pub id: SpriteId,
    pub desired: SpriteState,
    pub observed: SpriteState,
    pub health: Health,
}

impl From<&Sprite> for SpriteSnapshot {
    fn from(s: &Sprite) -> Self {
        Self { id: s.id.clone(), desired: s.desired, observed: s.observed, health: s.health }
    }
}

#[cfg(test)]
#[path = "sprite_tests.rs"]
mod tests;
