// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The durable KV Store interface (spec.md §4.9).

use crate::error::KvError;
use crate::namespace::Namespace;
use async_trait::async_trait;
use serde_json::Value;

/// Namespaced durable-ish storage for intents, runs, and the external
/// collaborators listed in spec.md §4.9. The default implementation is
/// process-wide and in-memory; a production deployment swaps in a SQL-backed
/// implementation behind the same trait (spec.md §6 "Persisted state"),
/// exactly as `Intent Store` (spec.md §4.3) is itself pluggable.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn put(&self, namespace: Namespace, key: &str, value: Value) -> Result<(), KvError>;
    async fn get(&self, namespace: Namespace, key: &str) -> Result<Value, KvError>;
    async fn list(&self, namespace: Namespace) -> Vec<Value>;
    async fn delete(&self, namespace: Namespace, key: &str) -> Result<(), KvError>;
}
