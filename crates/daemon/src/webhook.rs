// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Inbound GitHub webhook (spec.md §6 `POST /api/webhooks/github`):
//! HMAC-SHA256 signature verification, delivery-id dedup, and translation
//! into an `issue_triage` intent proposal.

use crate::app::App;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use hmac::{Hmac, Mac};
use lattice_core::Clock;
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;

type HmacSha256 = Hmac<Sha256>;

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/api/webhooks/github", post(handle_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Bind `0.0.0.0:{app.config.port}` and serve the webhook router until the
/// process is killed (spec.md §10.4 "hand off to a listener").
pub async fn serve(app: Arc<App>) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", app.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "lattice daemon listening for webhooks");
    axum::serve(listener, router(app)).await
}

async fn handle_webhook(State(app): State<Arc<App>>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let event_type = match header_str(&headers, "x-github-event") {
        Some(v) => v,
        None => return (StatusCode::BAD_REQUEST, "missing X-GitHub-Event").into_response(),
    };
    let delivery_id = match header_str(&headers, "x-github-delivery") {
        Some(v) => v,
        None => return (StatusCode::BAD_REQUEST, "missing X-GitHub-Delivery").into_response(),
    };
    let signature = match header_str(&headers, "x-hub-signature-256") {
        Some(v) => v,
        None => return (StatusCode::UNAUTHORIZED, "missing X-Hub-Signature-256").into_response(),
    };

    let Some(secret) = app.config.github_webhook_secret.as_deref() else {
        tracing::error!("received webhook with no GITHUB_WEBHOOK_SECRET configured");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    if !verify_signature(secret.as_bytes(), &body, &signature) {
        tracing::warn!(delivery_id = %delivery_id, "webhook signature verification failed");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if app.dedup.check_and_record(&delivery_id, std::time::Instant::now()) {
        tracing::debug!(delivery_id = %delivery_id, "duplicate webhook delivery ignored");
        return StatusCode::OK.into_response();
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(delivery_id = %delivery_id, error = %err, "malformed webhook payload");
            return (StatusCode::BAD_REQUEST, "malformed payload").into_response();
        }
    };

    if let Err(err) = propose_intent_for_event(&app, &event_type, &delivery_id, payload).await {
        tracing::error!(delivery_id = %delivery_id, error = %err, "failed to propose intent for webhook event");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    StatusCode::OK.into_response()
}

async fn propose_intent_for_event(
    app: &App,
    event_type: &str,
    delivery_id: &str,
    payload: serde_json::Value,
) -> Result<(), lattice_intent::IntentError> {
    let mut map = serde_json::Map::new();
    map.insert("event_type".to_string(), serde_json::Value::String(event_type.to_string()));
    map.insert("delivery_id".to_string(), serde_json::Value::String(delivery_id.to_string()));
    map.insert("payload".to_string(), payload);

    app.intents
        .propose(
            lattice_core::IntentKind::IssueTriage,
            lattice_core::IntentSource::new(lattice_core::SourceType::Webhook, delivery_id),
            format!("github webhook: {event_type}"),
            map,
            app.clock.utc_now(),
        )
        .await?;
    Ok(())
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name)?.to_str().ok().map(str::to_string)
}

/// Verify `sha256=<hex>` against an HMAC-SHA256 of the raw body, comparing
/// in constant time (spec.md §6 "HMAC-SHA256 over the raw body ... constant
/// time compare").
fn verify_signature(secret: &[u8], body: &[u8], header_value: &str) -> bool {
    let Some(hex_digest) = header_value.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(provided) = hex::decode(hex_digest) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    let expected = mac.finalize().into_bytes();

    expected.len() == provided.len() && bool::from(expected.as_slice().ct_eq(&provided))
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
