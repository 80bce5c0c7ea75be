// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Clock abstraction for testable time handling.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time.
///
/// [`Clock::now`] is a monotonic instant used for scheduling (backoff,
/// adaptive cadence); [`Clock::utc_now`] is a wall-clock timestamp used for
/// the fields persisted on entities (`created_at`, transition-log
/// timestamps, phase timestamps).
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Real system clock.
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    utc: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            utc: Arc::new(Mutex::new(DateTime::UNIX_EPOCH)),
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
        *self.utc.lock() += duration;
    }

    /// Set the wall-clock time.
    pub fn set_utc(&self, at: DateTime<Utc>) {
        *self.utc.lock() = at;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        *self.utc.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
