// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Process configuration (spec.md §6 "Environment variables"): environment
//! variables plus an optional `lattice.toml` policy file, merged at
//! startup.

use lattice_engine::{CadenceConfig, WorkerConfig};
use lattice_safety::GateConfig;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read policy file {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("failed to parse policy file {path}: {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
}

/// Everything read from the process environment at startup (spec.md §6).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub instance_name: String,
    pub github_repo: Option<String>,
    pub fly_app: Option<String>,
    pub fly_org: Option<String>,
    pub sprites_api_base: Option<String>,
    pub sprites_api_token: Option<String>,
    pub github_webhook_secret: Option<String>,
    pub github_app_id: Option<String>,
    pub github_app_installation_id: Option<String>,
    pub github_token: Option<String>,
    pub fly_token: Option<String>,
    pub fleet_fast_ms: u64,
    pub fleet_slow_ms: u64,
    pub fleet_backoff_cap_ms: u64,
}

impl Config {
    /// Load `.env` (if present) then read the variables spec.md §6 names.
    /// Missing optional variables fall through to `None`/the documented
    /// default and select the `stub` capability implementations.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080),
            instance_name: std::env::var("LATTICE_INSTANCE_NAME").unwrap_or_else(|_| "lattice".to_string()),
            github_repo: std::env::var("GITHUB_REPO").ok(),
            fly_app: std::env::var("FLY_APP").ok(),
            fly_org: std::env::var("FLY_ORG").ok(),
            sprites_api_base: std::env::var("SPRITES_API_BASE").ok(),
            sprites_api_token: std::env::var("SPRITES_API_TOKEN").ok(),
            github_webhook_secret: std::env::var("GITHUB_WEBHOOK_SECRET").ok(),
            github_app_id: std::env::var("GITHUB_APP_ID").ok(),
            github_app_installation_id: std::env::var("GITHUB_APP_INSTALLATION_ID").ok(),
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            fly_token: std::env::var("FLY_API_TOKEN").ok(),
            fleet_fast_ms: env_u64("LATTICE_FLEET_FAST_MS").unwrap_or(CadenceConfig::default().fast_ms),
            fleet_slow_ms: env_u64("LATTICE_FLEET_SLOW_MS").unwrap_or(CadenceConfig::default().slow_ms),
            fleet_backoff_cap_ms: env_u64("LATTICE_FLEET_BACKOFF_CAP_MS")
                .unwrap_or(WorkerConfig::default().backoff_cap_ms),
        }
    }

    /// Fleet Supervisor tick cadence, as tuned by `LATTICE_FLEET_FAST_MS` /
    /// `LATTICE_FLEET_SLOW_MS` (spec.md §4.2's adaptive cadence, defaults
    /// from [`CadenceConfig::default`]).
    pub fn cadence(&self) -> CadenceConfig {
        CadenceConfig { fast_ms: self.fleet_fast_ms, slow_ms: self.fleet_slow_ms }
    }

    /// Per-worker reconciliation tuning, with the restart/backoff cap from
    /// `LATTICE_FLEET_BACKOFF_CAP_MS` (spec.md §4.1 restart backoff).
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig { backoff_cap_ms: self.fleet_backoff_cap_ms, ..WorkerConfig::default() }
    }

    /// Whether the live Sprites/GitHub/Fly capabilities have enough
    /// configuration to run against real APIs, as opposed to the stub
    /// implementations used for offline development.
    pub fn has_live_sprites(&self) -> bool {
        self.sprites_api_base.is_some() && self.sprites_api_token.is_some()
    }

    pub fn has_live_github(&self) -> bool {
        self.github_token.is_some()
    }

    pub fn has_live_fly(&self) -> bool {
        self.fly_token.is_some()
    }
}

/// Load the Gate's policy from a `lattice.toml` file, falling back to
/// [`GateConfig::default`] if the file doesn't exist (policy is optional;
/// everything else in `Config` is environment-only).
pub fn load_gate_config(path: &Path) -> Result<GateConfig, ConfigError> {
    if !path.exists() {
        return Ok(GateConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
