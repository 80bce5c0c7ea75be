// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Fly capability (spec.md §4.6, §9): machine-lifecycle operations
//! against the Fly Machines API.
//!
//! The source this spec is distilled from shelled out to a CLI for this
//! capability; per spec.md §9's explicit redesign guidance this port talks
//! to the Machines API directly over HTTPS instead.

use crate::error::CapabilityError;
use crate::sprites::DEFAULT_TIMEOUT;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Machine {
    pub id: String,
    pub state: String,
}

#[async_trait]
pub trait FlyCapability: Send + Sync {
    async fn list_machines(&self, app: &str) -> Result<Vec<Machine>, CapabilityError>;
    async fn get_machine(&self, app: &str, machine_id: &str) -> Result<Machine, CapabilityError>;
    async fn start_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError>;
    async fn stop_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError>;
    async fn restart_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError>;
    async fn destroy_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError>;
}

pub struct LiveFly {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl LiveFly {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.machines.dev", token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build().unwrap_or_default();
        Self { client, base_url: base_url.into(), token: token.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, CapabilityError> {
        let response =
            builder.bearer_auth(&self.token).send().await.map_err(CapabilityError::from_reqwest)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CapabilityError::from_status(status, body))
        }
    }
}

#[async_trait]
impl FlyCapability for LiveFly {
    async fn list_machines(&self, app: &str) -> Result<Vec<Machine>, CapabilityError> {
        let response = self.send(self.client.get(self.url(&format!("/v1/apps/{app}/machines")))).await?;
        response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn get_machine(&self, app: &str, machine_id: &str) -> Result<Machine, CapabilityError> {
        let response = self
            .send(self.client.get(self.url(&format!("/v1/apps/{app}/machines/{machine_id}"))))
            .await?;
        response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn start_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError> {
        self.send(self.client.post(self.url(&format!("/v1/apps/{app}/machines/{machine_id}/start"))))
            .await?;
        Ok(())
    }

    async fn stop_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError> {
        self.send(self.client.post(self.url(&format!("/v1/apps/{app}/machines/{machine_id}/stop"))))
            .await?;
        Ok(())
    }

    async fn restart_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError> {
        self.send(self.client.post(self.url(&format!("/v1/apps/{app}/machines/{machine_id}/restart"))))
            .await?;
        Ok(())
    }

    async fn destroy_machine(&self, app: &str, machine_id: &str) -> Result<(), CapabilityError> {
        self.send(self.client.delete(self.url(&format!("/v1/apps/{app}/machines/{machine_id}"))))
            .await?;
        Ok(())
    }
}

/// Canned implementation for tests and offline development.
#[derive(Default)]
pub struct StubFly;

impl StubFly {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FlyCapability for StubFly {
    async fn list_machines(&self, _app: &str) -> Result<Vec<Machine>, CapabilityError> {
        Ok(Vec::new())
    }

    async fn get_machine(&self, _app: &str, machine_id: &str) -> Result<Machine, CapabilityError> {
        Ok(Machine { id: machine_id.to_string(), state: "started".into() })
    }

    async fn start_machine(&self, _app: &str, _machine_id: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn stop_machine(&self, _app: &str, _machine_id: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn restart_machine(&self, _app: &str, _machine_id: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn destroy_machine(&self, _app: &str, _machine_id: &str) -> Result<(), CapabilityError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "fly_tests.rs"]
mod tests;
