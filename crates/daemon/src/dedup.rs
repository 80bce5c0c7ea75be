// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Webhook delivery-id dedup cache (spec.md §6 "Duplicates (by delivery id,
//! 5-minute TTL by default) are acked with 200 and ignored").

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Tracks recently-seen delivery ids so a redelivered webhook is acked
/// without being reprocessed. Expired entries are swept lazily on insert.
pub struct DeliveryDedup {
    ttl: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl DeliveryDedup {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, seen: Mutex::new(HashMap::new()) }
    }

    /// Record `delivery_id` as seen at `now`, returning `true` if it was
    /// already present and still within its TTL (a duplicate delivery).
    pub fn check_and_record(&self, delivery_id: &str, now: Instant) -> bool {
        let mut seen = self.seen.lock();
        seen.retain(|_, seen_at| now.duration_since(*seen_at) < self.ttl);

        if seen.contains_key(delivery_id) {
            return true;
        }
        seen.insert(delivery_id.to_string(), now);
        false
    }
}

impl Default for DeliveryDedup {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
