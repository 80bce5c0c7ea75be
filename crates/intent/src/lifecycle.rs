// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Transition enforcement against the state machine (spec.md §4.3): legal
//! edges, phase timestamps, and the transition log. Pure and synchronous —
//! callers (the Store implementation) own persistence and publication.

use crate::error::IntentError;
use chrono::{DateTime, Utc};
use lattice_core::{state_machine::is_legal_transition, Intent, IntentState, Transition};

/// Apply `to` as the intent's next state in place, enforcing spec.md §4.3's
/// invariants: terminal intents never mutate, and every edge must be legal.
pub fn apply_transition(
    intent: &mut Intent,
    to: IntentState,
    actor: &str,
    reason: Option<String>,
    now: DateTime<Utc>,
) -> Result<(), IntentError> {
    if intent.state.is_terminal() {
        return Err(IntentError::Terminal(intent.id.clone()));
    }
    if !is_legal_transition(intent.state, to) {
        return Err(IntentError::InvalidTransition { from: intent.state, to });
    }

    let from = intent.state;
    intent.state = to;
    intent.updated_at = now;
    set_phase_timestamp(intent, from, to, now);
    intent.transition_log.push(Transition { from, to, timestamp: now, actor: actor.to_string(), reason });
    Ok(())
}

/// Set the phase timestamp field named for the target state (spec.md §4.3
/// "set the phase timestamp for the target state"). `Running` reached from
/// `waiting_for_input` is a resume, not a first start, so it sets
/// `resumed_at` instead of re-stamping `started_at`.
fn set_phase_timestamp(intent: &mut Intent, from: IntentState, to: IntentState, now: DateTime<Utc>) {
    match to {
        IntentState::Classified => intent.classified_at = Some(now),
        IntentState::Approved => intent.approved_at = Some(now),
        IntentState::Running if from == IntentState::WaitingForInput => intent.resumed_at = Some(now),
        IntentState::Running => intent.started_at = Some(now),
        IntentState::Blocked => intent.blocked_at = Some(now),
        IntentState::Completed | IntentState::Failed | IntentState::Rejected | IntentState::Canceled => {
            intent.completed_at = Some(now)
        }
        IntentState::Proposed | IntentState::AwaitingApproval | IntentState::WaitingForInput => {}
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
