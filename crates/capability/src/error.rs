// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Normalized error taxonomy every capability implementation returns
//! (spec.md §4.6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("timeout")]
    Timeout,
    #[error("client error {status}: {message}")]
    ClientError { status: u16, message: String },
    #[error("server error {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not implemented")]
    NotImplemented,
}

impl CapabilityError {
    /// Normalize a `reqwest::Error` into the taxonomy above.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return CapabilityError::Timeout;
        }
        if err.is_connect() {
            return CapabilityError::ConnectionError(err.to_string());
        }
        if let Some(status) = err.status() {
            let message = err.to_string();
            return if status.is_client_error() {
                CapabilityError::ClientError { status: status.as_u16(), message }
            } else {
                CapabilityError::ServerError { status: status.as_u16(), message }
            };
        }
        CapabilityError::ConnectionError(err.to_string())
    }

    /// Map an HTTP status code returned by a capability's backing API into
    /// the taxonomy, given an already-read response body.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => CapabilityError::Unauthorized,
            404 => CapabilityError::NotFound,
            429 => CapabilityError::RateLimited,
            400..=499 => CapabilityError::ClientError { status: status.as_u16(), message: body },
            _ => CapabilityError::ServerError { status: status.as_u16(), message: body },
        }
    }
}
