// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Process-wide, concurrent, read-optimized in-memory [`KvStore`] (spec.md
//! §4.9's default implementation).

use crate::error::KvError;
use crate::namespace::Namespace;
use crate::store::KvStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryKvStore {
    namespaces: RwLock<HashMap<&'static str, HashMap<String, Value>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn put(&self, namespace: Namespace, key: &str, value: Value) -> Result<(), KvError> {
        let mut guard = self.namespaces.write();
        guard.entry(namespace.as_str()).or_default().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, namespace: Namespace, key: &str) -> Result<Value, KvError> {
        let guard = self.namespaces.read();
        guard
            .get(namespace.as_str())
            .and_then(|m| m.get(key))
            .cloned()
            .ok_or_else(|| KvError::NotFound { namespace: namespace.to_string(), key: key.to_string() })
    }

    async fn list(&self, namespace: Namespace) -> Vec<Value> {
        let guard = self.namespaces.read();
        guard.get(namespace.as_str()).map(|m| m.values().cloned().collect()).unwrap_or_default()
    }

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<(), KvError> {
        let mut guard = self.namespaces.write();
        match guard.get_mut(namespace.as_str()).and_then(|m| m.remove(key)) {
            Some(_) => Ok(()),
            None => Err(KvError::NotFound { namespace: namespace.to_string(), key: key.to_string() }),
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
