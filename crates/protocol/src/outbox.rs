// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Outbox reconciliation (spec.md §4.7): merge the streamed event list with
//! the durable `outbox.jsonl` copy, preferring the outbox on duplicates and
//! rehydrating outbox-only events from crashed sessions.

use crate::envelope::ProtocolEvent;
use std::collections::HashMap;

/// Merge `streamed` and `outbox` into a single list sorted by timestamp.
///
/// Ties are broken by arrival order: streamed events first, then
/// outbox-only events, matching spec.md §5's ordering guarantee. `Vec::sort`
/// is stable, so building the pre-sort vector in that order is sufficient.
pub fn reconcile(streamed: Vec<ProtocolEvent>, outbox: Vec<ProtocolEvent>) -> Vec<ProtocolEvent> {
    let mut by_key: HashMap<_, _> = outbox.iter().map(|event| (event.reconcile_key(), event.clone())).collect();

    let mut merged: Vec<ProtocolEvent> = Vec::with_capacity(streamed.len() + outbox.len());
    for event in streamed {
        let key = event.reconcile_key();
        match by_key.remove(&key) {
            Some(outbox_copy) => merged.push(outbox_copy),
            None => merged.push(event),
        }
    }

    // Whatever's left in `by_key` never had a streamed counterpart.
    let mut outbox_only: Vec<ProtocolEvent> =
        outbox.into_iter().filter(|event| by_key.contains_key(&event.reconcile_key())).collect();
    outbox_only.sort_by_key(|event| event.timestamp);
    merged.extend(outbox_only);

    merged.sort_by_key(|event| event.timestamp);
    merged
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
