// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Forecast client errors

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a forecast request did not produce records
///
/// Nothing is retried; each variant reaches the caller as-is.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The request never got a response: DNS, connect, timeout, or the
    /// connection dropped while reading the body
    #[error("transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// The server answered with a non-success status; `body` is the
    /// response text as sent
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The server answered successfully but the body did not match the
    /// forecast schema
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// The caller canceled the request before it settled
    #[error("request canceled")]
    Canceled,

    /// The HTTP client could not be built from the supplied configuration
    #[error("invalid client configuration: {message}")]
    Config { message: String },
}

impl ForecastError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, ForecastError::Canceled)
    }

    /// HTTP status, when the server got far enough to send one
    pub fn status(&self) -> Option<u16> {
        match self {
            ForecastError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a failure to get a response at all
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        ForecastError::Transport {
            timed_out: error.is_timeout(),
            message: error.to_string(),
        }
    }

    /// Classify a response by status first, then decode a success body
    ///
    /// Any non-2xx is a `Server` error carrying the body text as sent, so a
    /// proxy page or an empty 503 keeps its status.
    pub(crate) async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, Self> {
        let status = response.status();
        let body = response.text().await.map_err(Self::transport)?;

        if !status.is_success() {
            return Err(ForecastError::Server {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ForecastError::InvalidResponse {
            message: format!("{} (status {})", e, status.as_u16()),
        })
    }
}
