// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Audit Entry entity (spec.md §3, §4.5) — an append-only record of one
//! capability invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a capability dispatch, recorded regardless of whether the
/// implementation was ever called (spec.md §8 item 3: audit completeness).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuditResult {
    Allowed,
    Denied { reason: String },
    RequiresApproval { intent_id: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub capability: String,
    pub operation: String,
    /// Arguments with sensitive keys redacted (spec.md §4.5, §8 item 4).
    pub sanitized_args: Value,
    pub classification: Option<crate::intent::Classification>,
    pub result: AuditResult,
    pub actor: String,
    pub operator: Option<String>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Case-insensitive key names redacted from audited arguments (spec.md §4.5).
pub const SENSITIVE_KEYS: &[&str] =
    &["token", "password", "secret", "key", "api_key", "access_token"];

pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Redact sensitive keys from a JSON value. Only object-valued args are
/// scanned; non-map args pass through unchanged (spec.md §4.5). Recurses
/// into nested objects and arrays so sensitive keys are caught regardless of
/// nesting depth.
pub fn sanitize_args(args: &Value) -> Value {
    match args {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let lower = k.to_lowercase();
                if SENSITIVE_KEYS.contains(&lower.as_str()) {
                    out.insert(k.clone(), Value::String(REDACTED_PLACEHOLDER.to_string()));
                } else {
                    out.insert(k.clone(), sanitize_args(v));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sanitize_args).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
