// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Gate: decides `{allow | deny | require_approval}` for a classified action
//! (spec.md §4.5).

use lattice_core::Classification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    Allow,
    Deny { reason: String },
    RequireApproval,
}

/// One policy rule. Rules are evaluated in the order they appear in
/// [`GateConfig::policy_rules`]; the first rule that matches wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PolicyRule {
    /// Allow if every affected resource is a file under one of these path
    /// prefixes.
    PathAutoApprove { path_prefixes: Vec<String> },
    /// Deny controlled/dangerous actions outside `[start_hour, end_hour)`
    /// on the local clock. Safe actions are never affected.
    TimeGate { start_hour: u32, end_hour: u32 },
    /// Allow or deny based on the `repo` named in the action's payload.
    RepoOverride { repo: String, decision: GateDecision },
}

impl PolicyRule {
    fn evaluate(&self, ctx: &GateContext) -> Option<GateDecision> {
        match self {
            PolicyRule::PathAutoApprove { path_prefixes } => {
                let all_under_prefix = !ctx.affected_resources.is_empty()
                    && ctx
                        .affected_resources
                        .iter()
                        .all(|resource| path_prefixes.iter().any(|prefix| resource.starts_with(prefix)));
                all_under_prefix.then_some(GateDecision::Allow)
            }
            PolicyRule::TimeGate { start_hour, end_hour } => {
                let gated = matches!(ctx.classification, Some(Classification::Controlled | Classification::Dangerous));
                if !gated {
                    return None;
                }
                let in_window = if start_hour <= end_hour {
                    ctx.local_hour >= *start_hour && ctx.local_hour < *end_hour
                } else {
                    ctx.local_hour >= *start_hour || ctx.local_hour < *end_hour
                };
                (!in_window).then(|| GateDecision::Deny { reason: "outside allowed hours".into() })
            }
            PolicyRule::RepoOverride { repo, decision } => {
                (ctx.repo == Some(repo.as_str())).then(|| decision.clone())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub allow_controlled: bool,
    pub allow_dangerous: bool,
    pub require_approval_for_controlled: bool,
    pub policy_rules: Vec<PolicyRule>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allow_controlled: true,
            allow_dangerous: true,
            require_approval_for_controlled: true,
            policy_rules: Vec::new(),
        }
    }
}

/// Everything the gate needs to evaluate one dispatch, independent of how
/// the caller represents its action type.
pub struct GateContext<'a> {
    pub classification: Option<Classification>,
    pub affected_resources: &'a [String],
    pub repo: Option<&'a str>,
    pub local_hour: u32,
}

/// Decide the outcome for one classified action (spec.md §4.5).
///
/// `classification` being `None` (`unknown_action`) always denies — an
/// unrecognized action never auto-upgrades to `safe`.
pub fn decide(ctx: &GateContext, config: &GateConfig) -> GateDecision {
    let Some(classification) = ctx.classification else {
        return GateDecision::Deny { reason: "unknown_action".into() };
    };

    for rule in &config.policy_rules {
        if let Some(decision) = rule.evaluate(ctx) {
            // A dangerous action always needs a human's approval, even when
            // a rule would otherwise auto-approve it; only controlled actions
            // may skip straight to `allow` via policy.
            if decision == GateDecision::Allow && classification == Classification::Dangerous {
                return GateDecision::RequireApproval;
            }
            return decision;
        }
    }

    match classification {
        Classification::Safe => GateDecision::Allow,
        Classification::Controlled => {
            if !config.allow_controlled {
                GateDecision::Deny { reason: "controlled actions disabled".into() }
            } else if config.require_approval_for_controlled {
                GateDecision::RequireApproval
            } else {
                GateDecision::Allow
            }
        }
        Classification::Dangerous => {
            if !config.allow_dangerous {
                GateDecision::Deny { reason: "dangerous actions disabled".into() }
            } else {
                GateDecision::RequireApproval
            }
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
