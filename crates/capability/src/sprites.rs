// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! The Sprites capability (spec.md §4.6): "the one that carries actual
//! systems interest". Talks to the sprite-hosting REST API (spec.md §6).

use crate::error::CapabilityError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use lattice_core::SpriteState;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// One sprite as reported by the hosting API, before Lattice maps its raw
/// status string onto the [`SpriteState`] alphabet.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteRecord {
    pub id: String,
    pub status: String,
}

impl SpriteRecord {
    /// `running->ready`, `warm->waking`, `cold|sleeping->hibernating`;
    /// anything else maps to `error` (spec.md §4.6).
    pub fn observed_state(&self) -> SpriteState {
        match self.status.as_str() {
            "running" => SpriteState::Ready,
            "warm" => SpriteState::Waking,
            "cold" | "sleeping" => SpriteState::Hibernating,
            _ => SpriteState::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub exit_code: Option<i32>,
    pub stdout: String,
}

/// A streaming `exec_ws` session. Lines arrive as the sprite writes to
/// stdout; the Protocol Parser attaches to this stream to extract
/// `LATTICE_EVENT` lines (spec.md §4.7).
pub struct ExecSession {
    pub lines: mpsc::Receiver<String>,
}

#[async_trait]
pub trait SpritesCapability: Send + Sync {
    async fn list(&self) -> Result<Vec<SpriteRecord>, CapabilityError>;
    async fn get(&self, id: &str) -> Result<SpriteRecord, CapabilityError>;
    async fn create(&self, id: &str) -> Result<SpriteRecord, CapabilityError>;
    async fn delete(&self, id: &str) -> Result<(), CapabilityError>;

    /// Emulated against APIs that auto-wake on any command: runs a no-op
    /// exec (spec.md §4.6).
    async fn wake(&self, id: &str) -> Result<(), CapabilityError>;

    /// No-op if the hosting API has no explicit sleep (spec.md §4.6).
    async fn sleep(&self, id: &str) -> Result<(), CapabilityError>;

    async fn exec(&self, id: &str, command: &str) -> Result<ExecOutcome, CapabilityError>;
    async fn exec_ws(&self, id: &str, command: &str) -> Result<ExecSession, CapabilityError>;
    async fn fetch_logs(&self, id: &str) -> Result<String, CapabilityError>;
    async fn restore_checkpoint(&self, id: &str, checkpoint_id: &str) -> Result<(), CapabilityError>;
}

/// Real implementation against the sprite-hosting REST API (spec.md §6):
/// bearer-token HTTPS, `GET/POST/PUT/DELETE /v1/sprites[/{id}]`.
pub struct LiveSprites {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl LiveSprites {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
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
impl SpritesCapability for LiveSprites {
    async fn list(&self) -> Result<Vec<SpriteRecord>, CapabilityError> {
        let response = self.send(self.client.get(self.url("/v1/sprites"))).await?;
        response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn get(&self, id: &str) -> Result<SpriteRecord, CapabilityError> {
        let response = self.send(self.client.get(self.url(&format!("/v1/sprites/{id}")))).await?;
        response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn create(&self, id: &str) -> Result<SpriteRecord, CapabilityError> {
        let response = self
            .send(self.client.post(self.url("/v1/sprites")).json(&serde_json::json!({ "id": id })))
            .await?;
        response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), CapabilityError> {
        self.send(self.client.delete(self.url(&format!("/v1/sprites/{id}")))).await?;
        Ok(())
    }

    async fn wake(&self, id: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client
                .put(self.url(&format!("/v1/sprites/{id}")))
                .json(&serde_json::json!({ "status": "running" })),
        )
        .await?;
        self.exec(id, "true").await.map(|_| ())
    }

    async fn sleep(&self, _id: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn exec(&self, id: &str, command: &str) -> Result<ExecOutcome, CapabilityError> {
        let response = self
            .send(self.client.post(self.url(&format!("/v1/sprites/{id}/exec"))).query(&[("cmd", command)]))
            .await?;
        let body: ExecResponseBody =
            response.json().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;
        Ok(ExecOutcome { exit_code: body.exit_code, stdout: body.stdout })
    }

    async fn exec_ws(&self, id: &str, command: &str) -> Result<ExecSession, CapabilityError> {
        let ws_base = self.base_url.replacen("http", "ws", 1);
        let url = format!("{}/v1/sprites/{id}/exec?cmd={command}&stream=ws", ws_base.trim_end_matches('/'));
        let mut request = url
            .into_client_request()
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;
        request.headers_mut().insert(
            "Authorization",
            format!("Bearer {}", self.token)
                .parse()
                .map_err(|_| CapabilityError::InvalidResponse("invalid auth header".into()))?,
        );

        let (stream, _) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(|e| CapabilityError::ConnectionError(e.to_string()))?;
        let (mut write, mut read) = stream.split();
        let (tx, rx) = mpsc::channel(256);

        tokio::spawn(async move {
            // Streaming sessions are otherwise read-only from Lattice's side;
            // sending a close frame lets the server know we're done once the
            // receiver drops.
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(line)) => {
                        if tx.send(line.to_string()).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    _ => {}
                }
            }
            let _ = write.close().await;
        });

        Ok(ExecSession { lines: rx })
    }

    async fn fetch_logs(&self, id: &str) -> Result<String, CapabilityError> {
        let response = self.send(self.client.get(self.url(&format!("/v1/sprites/{id}/services")))).await?;
        response.text().await.map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }

    async fn restore_checkpoint(&self, id: &str, checkpoint_id: &str) -> Result<(), CapabilityError> {
        self.send(
            self.client
                .post(self.url(&format!("/v1/sprites/{id}/checkpoints/{checkpoint_id}/restore"))),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ExecResponseBody {
    exit_code: Option<i32>,
    #[serde(default)]
    stdout: String,
}

/// Canned implementation for tests and offline development.
#[derive(Default)]
pub struct StubSprites {
    sprites: Mutex<HashMap<String, SpriteRecord>>,
}

impl StubSprites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, id: impl Into<String>, status: impl Into<String>) {
        let id = id.into();
        self.sprites.lock().insert(id.clone(), SpriteRecord { id, status: status.into() });
    }
}

#[async_trait]
impl SpritesCapability for StubSprites {
    async fn list(&self) -> Result<Vec<SpriteRecord>, CapabilityError> {
        Ok(self.sprites.lock().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<SpriteRecord, CapabilityError> {
        self.sprites.lock().get(id).cloned().ok_or(CapabilityError::NotFound)
    }

    async fn create(&self, id: &str) -> Result<SpriteRecord, CapabilityError> {
        let record = SpriteRecord { id: id.to_string(), status: "cold".into() };
        self.sprites.lock().insert(id.to_string(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), CapabilityError> {
        self.sprites.lock().remove(id).map(|_| ()).ok_or(CapabilityError::NotFound)
    }

    async fn wake(&self, id: &str) -> Result<(), CapabilityError> {
        let mut sprites = self.sprites.lock();
        let record = sprites.get_mut(id).ok_or(CapabilityError::NotFound)?;
        record.status = "running".into();
        Ok(())
    }

    async fn sleep(&self, id: &str) -> Result<(), CapabilityError> {
        let mut sprites = self.sprites.lock();
        let record = sprites.get_mut(id).ok_or(CapabilityError::NotFound)?;
        record.status = "sleeping".into();
        Ok(())
    }

    async fn exec(&self, id: &str, _command: &str) -> Result<ExecOutcome, CapabilityError> {
        if !self.sprites.lock().contains_key(id) {
            return Err(CapabilityError::NotFound);
        }
        Ok(ExecOutcome { exit_code: Some(0), stdout: String::new() })
    }

    async fn exec_ws(&self, id: &str, _command: &str) -> Result<ExecSession, CapabilityError> {
        if !self.sprites.lock().contains_key(id) {
            return Err(CapabilityError::NotFound);
        }
        let (_tx, rx) = mpsc::channel(1);
        Ok(ExecSession { lines: rx })
    }

    async fn fetch_logs(&self, id: &str) -> Result<String, CapabilityError> {
        if !self.sprites.lock().contains_key(id) {
            return Err(CapabilityError::NotFound);
        }
        Ok(String::new())
    }

    async fn restore_checkpoint(&self, id: &str, _checkpoint_id: &str) -> Result<(), CapabilityError> {
        if !self.sprites.lock().contains_key(id) {
            return Err(CapabilityError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sprites_tests.rs"]
mod tests;
