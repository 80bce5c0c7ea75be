// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Secret Store capability (spec.md §4.6): backs dynamic credential
//! changes picked up by the capability registry (spec.md §4.6 "Configuration
//! selects per capability at startup and at every dynamic credential
//! change.").

use crate::error::CapabilityError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[async_trait]
pub trait SecretStoreCapability: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String, CapabilityError>;
    async fn put_secret(&self, name: &str, value: &str) -> Result<(), CapabilityError>;
    async fn delete_secret(&self, name: &str) -> Result<(), CapabilityError>;
    /// Secret *names* only — values are never listed.
    async fn list_secrets(&self) -> Result<Vec<String>, CapabilityError>;
}

/// Process-local secret cache seeded from the environment at startup.
/// `put_secret`/`delete_secret` mutate the in-memory set so a credential
/// rotation takes effect without a process restart.
pub struct LiveSecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl LiveSecretStore {
    pub fn from_env(names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut secrets = HashMap::new();
        for name in names {
            let name = name.as_ref().to_string();
            if let Ok(value) = std::env::var(&name) {
                secrets.insert(name, value);
            }
        }
        Self { secrets: RwLock::new(secrets) }
    }
}

#[async_trait]
impl SecretStoreCapability for LiveSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, CapabilityError> {
        self.secrets.read().get(name).cloned().ok_or(CapabilityError::NotFound)
    }

    async fn put_secret(&self, name: &str, value: &str) -> Result<(), CapabilityError> {
        self.secrets.write().insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> Result<(), CapabilityError> {
        self.secrets.write().remove(name).map(|_| ()).ok_or(CapabilityError::NotFound)
    }

    async fn list_secrets(&self) -> Result<Vec<String>, CapabilityError> {
        Ok(self.secrets.read().keys().cloned().collect())
    }
}

/// Canned implementation for tests and offline development.
#[derive(Default)]
pub struct StubSecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl StubSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, name: impl Into<String>, value: impl Into<String>) {
        self.secrets.write().insert(name.into(), value.into());
    }
}

#[async_trait]
impl SecretStoreCapability for StubSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, CapabilityError> {
        self.secrets.read().get(name).cloned().ok_or(CapabilityError::NotFound)
    }

    async fn put_secret(&self, name: &str, value: &str) -> Result<(), CapabilityError> {
        self.secrets.write().insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> Result<(), CapabilityError> {
        self.secrets.write().remove(name).map(|_| ()).ok_or(CapabilityError::NotFound)
    }

    async fn list_secrets(&self) -> Result<Vec<String>, CapabilityError> {
        Ok(self.secrets.read().keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "secret_store_tests.rs"]
mod tests;
