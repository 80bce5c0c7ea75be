// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Static `{capability, operation} -> classification` registry (spec.md §4.5).
//!
//! An unknown pair never auto-upgrades to `safe` — callers must treat `None`
//! as `unknown_action` and gate accordingly.

use lattice_core::Classification;

const REGISTRY: &[(&str, &str, Classification)] = &[
    ("sprites", "list", Classification::Safe),
    ("sprites", "get", Classification::Safe),
    ("sprites", "fetch_logs", Classification::Safe),
    ("sprites", "create", Classification::Controlled),
    ("sprites", "wake", Classification::Controlled),
    ("sprites", "sleep", Classification::Controlled),
    ("sprites", "exec", Classification::Controlled),
    ("sprites", "exec_ws", Classification::Controlled),
    ("sprites", "exec_post", Classification::Controlled),
    ("sprites", "delete", Classification::Dangerous),
    ("github", "list_issues", Classification::Safe),
    ("github", "get_issue", Classification::Safe),
    ("github", "list_prs", Classification::Safe),
    ("github", "list_reviews", Classification::Safe),
    ("github", "list_review_comments", Classification::Safe),
    ("github", "create_comment", Classification::Controlled),
    ("github", "add_label", Classification::Controlled),
    ("github", "remove_label", Classification::Controlled),
    ("github", "create_pr", Classification::Controlled),
    ("github", "create_branch", Classification::Controlled),
    ("github", "merge_pr", Classification::Dangerous),
    ("github", "delete_branch", Classification::Dangerous),
    ("fly", "list_machines", Classification::Safe),
    ("fly", "get_machine", Classification::Safe),
    ("fly", "start_machine", Classification::Controlled),
    ("fly", "stop_machine", Classification::Controlled),
    ("fly", "restart_machine", Classification::Controlled),
    ("fly", "restore_checkpoint", Classification::Dangerous),
    ("fly", "destroy_machine", Classification::Dangerous),
    ("secret_store", "list_secrets", Classification::Safe),
    ("secret_store", "get_secret", Classification::Controlled),
    ("secret_store", "put_secret", Classification::Dangerous),
    ("secret_store", "delete_secret", Classification::Dangerous),
];

/// Classify a `{capability, operation}` pair. Returns `None` for any pair
/// not in the static registry (`unknown_action`).
pub fn classify(capability: &str, operation: &str) -> Option<Classification> {
    REGISTRY
        .iter()
        .find(|(cap, op, _)| *cap == capability && *op == operation)
        .map(|(_, _, classification)| *classification)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
