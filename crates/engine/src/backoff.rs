// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Exponential restart/retry backoff (spec.md §4.2 step 5, §8 property 8
//! "Backoff bounded").

use crate::cadence::jitter;
use std::time::Duration;

/// `min(cap, base * 2^(failure_count-1)) ± jitter%` (spec.md §4.2 step 5).
/// `failure_count` of 0 is treated as 1 (the first failure already incurs
/// one base-delay backoff).
pub fn compute_backoff(failure_count: u32, base: Duration, cap: Duration, jitter_fraction: f64, roll: f64) -> Duration {
    let exponent = failure_count.saturating_sub(1).min(32);
    let scaled = base.saturating_mul(1u32.checked_shl(exponent).unwrap_or(u32::MAX));
    let capped = scaled.min(cap);
    jitter(capped, jitter_fraction, roll)
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
