// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Known namespaces for the durable KV store (spec.md §4.9).

/// Namespaces are known up front; the store itself has no opinion on what
/// lives in each one — it is a side-effect-free collaborator, not a domain
/// object (spec.md §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Intents,
    Runs,
    Projects,
    RepoProfiles,
    PlanningContexts,
    PrTracker,
    DilHistory,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Intents => "intents",
            Namespace::Runs => "runs",
            Namespace::Projects => "projects",
            Namespace::RepoProfiles => "repo_profiles",
            Namespace::PlanningContexts => "planning_contexts",
            Namespace::PrTracker => "pr_tracker",
            Namespace::DilHistory => "dil_history",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
