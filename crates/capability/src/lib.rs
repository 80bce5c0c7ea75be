// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! Capability Dispatch (spec.md §4.6): typed interfaces over Sprites,
//! GitHub, Fly, and the Secret Store, a process-wide implementation
//! registry, and the `classify -> gate -> audit -> call` dispatch wrapper
//! (spec.md §4.5).

mod dispatch;
mod error;
mod fly;
mod github;
mod registry;
mod secret_store;
mod sprites;

pub use dispatch::{dispatch, DispatchError, DispatchRequest};
pub use error::CapabilityError;
pub use fly::{FlyCapability, LiveFly, Machine, StubFly};
pub use github::{GitHubCapability, Issue, LiveGitHub, PullRequest, Review, ReviewComment, StubGitHub};
pub use registry::CapabilityRegistry;
pub use secret_store::{LiveSecretStore, SecretStoreCapability, StubSecretStore};
pub use sprites::{ExecOutcome, ExecSession, LiveSprites, SpriteRecord, SpritesCapability, StubSprites};
