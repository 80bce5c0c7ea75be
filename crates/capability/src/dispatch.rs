// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The capability dispatch wrapper every outbound capability call goes
//! through (spec.md §4.5):
//!
//! ```text
//! classify(cap, op) -> action
//! gate(action, config, policy) -> decision
//! if deny: audit(denied); return {error, denied}
//! if require_approval: propose intent; audit(requires_approval); return {error, pending_approval}
//! else: call impl; audit(result); return result
//! ```
//!
//! Proposing the intent on a `require_approval` decision is the caller's
//! job — this crate has no dependency on the Intent Pipeline — so `dispatch`
//! takes a `propose_intent` callback that returns the new intent's id.

use crate::error::CapabilityError;
use lattice_core::{sanitize_args, AuditEntry, AuditResult, CapabilityAction, Classification, Clock};
use lattice_eventbus::EventBus;
use lattice_safety::{classify, decide, record, AuditLog, GateConfig, GateContext, GateDecision};
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("denied: {reason}")]
    Denied { reason: String },
    #[error("pending approval on intent {intent_id}")]
    PendingApproval { intent_id: String },
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

pub struct DispatchRequest<'a> {
    pub capability: &'a str,
    pub operation: &'a str,
    pub affected_resources: &'a [String],
    pub repo: Option<&'a str>,
    pub args: serde_json::Value,
    pub actor: &'a str,
    pub operator: Option<&'a str>,
    pub local_hour: u32,
}

#[allow(clippy::too_many_arguments)]
pub async fn dispatch<T, C, Call, CallFut, Propose>(
    request: DispatchRequest<'_>,
    config: &GateConfig,
    bus: &EventBus,
    audit_log: &dyn AuditLog,
    clock: &C,
    propose_intent: Propose,
    call: Call,
) -> Result<T, DispatchError>
where
    C: Clock,
    Call: FnOnce() -> CallFut,
    CallFut: Future<Output = Result<T, CapabilityError>>,
    Propose: FnOnce(&CapabilityAction) -> String,
{
    let started = clock.now();
    let classification = classify(request.capability, request.operation);
    let ctx = GateContext {
        classification,
        affected_resources: request.affected_resources,
        repo: request.repo,
        local_hour: request.local_hour,
    };
    let decision = decide(&ctx, config);
    let sanitized_args = sanitize_args(&request.args);

    let finish = |result: AuditResult, clock: &C| AuditEntry {
        capability: request.capability.to_string(),
        operation: request.operation.to_string(),
        sanitized_args,
        classification,
        result,
        actor: request.actor.to_string(),
        operator: request.operator.map(str::to_string),
        duration_ms: clock.now().duration_since(started).as_millis() as u64,
        timestamp: clock.utc_now(),
    };

    match decision {
        GateDecision::Deny { reason } => {
            record(bus, audit_log, finish(AuditResult::Denied { reason: reason.clone() }, clock));
            Err(DispatchError::Denied { reason })
        }
        GateDecision::RequireApproval => {
            // Reachable only when classification was Some: `decide` denies
            // unknown_action before policy/default rules run.
            let action = CapabilityAction::new(
                request.capability,
                request.operation,
                classification.unwrap_or(Classification::Controlled),
            );
            let intent_id = propose_intent(&action);
            record(
                bus,
                audit_log,
                finish(AuditResult::RequiresApproval { intent_id: intent_id.clone() }, clock),
            );
            Err(DispatchError::PendingApproval { intent_id })
        }
        GateDecision::Allow => match call().await {
            Ok(value) => {
                record(bus, audit_log, finish(AuditResult::Allowed, clock));
                Ok(value)
            }
            Err(err) => {
                record(bus, audit_log, finish(AuditResult::Error { message: err.to_string() }, clock));
                Err(DispatchError::Capability(err))
            }
        },
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
