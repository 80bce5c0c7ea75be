// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Process-wide registry mapping capability name to current implementation
//! (spec.md §4.6). Read-mostly: dynamic reconfiguration takes a short write
//! lock, readers clone out an `Arc` snapshot and release the lock before
//! doing any I/O (spec.md §5 "readers get a snapshot reference").

use crate::fly::FlyCapability;
use crate::github::GitHubCapability;
use crate::secret_store::SecretStoreCapability;
use crate::sprites::SpritesCapability;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct CapabilityRegistry {
    sprites: RwLock<Arc<dyn SpritesCapability>>,
    github: RwLock<Arc<dyn GitHubCapability>>,
    fly: RwLock<Arc<dyn FlyCapability>>,
    secret_store: RwLock<Arc<dyn SecretStoreCapability>>,
}

impl CapabilityRegistry {
    pub fn new(
        sprites: Arc<dyn SpritesCapability>,
        github: Arc<dyn GitHubCapability>,
        fly: Arc<dyn FlyCapability>,
        secret_store: Arc<dyn SecretStoreCapability>,
    ) -> Self {
        Self {
            sprites: RwLock::new(sprites),
            github: RwLock::new(github),
            fly: RwLock::new(fly),
            secret_store: RwLock::new(secret_store),
        }
    }

    pub fn sprites(&self) -> Arc<dyn SpritesCapability> {
        self.sprites.read().clone()
    }

    pub fn github(&self) -> Arc<dyn GitHubCapability> {
        self.github.read().clone()
    }

    pub fn fly(&self) -> Arc<dyn FlyCapability> {
        self.fly.read().clone()
    }

    pub fn secret_store(&self) -> Arc<dyn SecretStoreCapability> {
        self.secret_store.read().clone()
    }

    /// Swap in a new Sprites implementation (e.g. on a credential rotation).
    pub fn set_sprites(&self, implementation: Arc<dyn SpritesCapability>) {
        *self.sprites.write() = implementation;
    }

    pub fn set_github(&self, implementation: Arc<dyn GitHubCapability>) {
        *self.github.write() = implementation;
    }

    pub fn set_fly(&self, implementation: Arc<dyn FlyCapability>) {
        *self.fly.write() = implementation;
    }

    pub fn set_secret_store(&self, implementation: Arc<dyn SecretStoreCapability>) {
        *self.secret_store.write() = implementation;
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
