// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Adaptive reconciliation cadence (spec.md §4.2): `fast_ms` while viewers
//! are present, `slow_ms` otherwise, with ±10% jitter to de-herd the fleet.

use rand::Rng;
use std::time::Duration;

/// De-herding jitter applied to every scheduled tick (spec.md §4.2 "Jitter
/// of ±10%") and, absent a more specific figure, to backoff delays too
/// (spec.md §4.2 "± jitter%" does not name a distinct percentage there).
pub const JITTER_FRACTION: f64 = 0.10;

#[derive(Debug, Clone, Copy)]
pub struct CadenceConfig {
    pub fast_ms: u64,
    pub slow_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self { fast_ms: 5_000, slow_ms: 60_000 }
    }
}

/// Jitter a base duration by `±fraction`, given a roll in `[-1.0, 1.0]`.
pub fn jitter(base: Duration, fraction: f64, roll: f64) -> Duration {
    let factor = 1.0 + fraction * roll.clamp(-1.0, 1.0);
    Duration::from_secs_f64((base.as_secs_f64() * factor).max(0.0))
}

/// The next scheduled tick interval for a worker, given whether viewers are
/// currently present (spec.md §4.2 "Adaptive cadence").
pub fn next_interval(viewers_present: bool, config: &CadenceConfig, roll: f64) -> Duration {
    let base_ms = if viewers_present { config.fast_ms } else { config.slow_ms };
    jitter(Duration::from_millis(base_ms), JITTER_FRACTION, roll)
}

/// Roll a fresh jitter value from the thread-local RNG, for call sites that
/// aren't under test (tests pass an explicit roll to `jitter`/`next_interval`
/// for determinism).
pub fn roll_jitter() -> f64 {
    rand::thread_rng().gen_range(-1.0..=1.0)
}

#[cfg(test)]
#[path = "cadence_tests.rs"]
mod tests;
