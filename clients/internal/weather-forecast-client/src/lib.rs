// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Weather Forecast Client Library
//!
//! Typed access to the weather forecast service. The low-level [`Client`]
//! is generated by Progenitor from
//! `openapi-specs/generated/weather-forecast-api.json`; [`ForecastClient`]
//! wraps it into a single cancelable operation.
//!
//! ## Usage
//!
//! ```ignore
//! use weather_forecast_client::{ClientConfig, ForecastClient, ForecastError};
//!
//! let client = ForecastClient::new(ClientConfig::new("http://localhost:5133"))?;
//!
//! let call = client.get_weather_forecast();
//! let cancel = call.cancel_handle();
//! // hand `cancel` to whatever may abort the request
//!
//! match call.await {
//!     Ok(forecasts) => println!("{} days", forecasts.len()),
//!     Err(ForecastError::Canceled) => println!("canceled"),
//!     Err(e) => eprintln!("failed: {e}"),
//! }
//! ```

mod call;
mod error;

// Include the Progenitor-generated client code
// Allow unwrap in generated code - Progenitor uses it in Client::new()
#[allow(clippy::unwrap_used)]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/client.rs"));
}
pub use generated::*;

pub use call::{CallState, CancelHandle, ForecastCall};
pub use error::ForecastError;

use progenitor_client::ClientInfo as _;
use std::time::Duration;

/// Connection settings for [`ForecastClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host every request path is appended to, e.g.
    /// `http://localhost:5133`
    pub base_url: String,
    /// Upper bound on a whole request, connect through body; `None` waits
    /// indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Forecast client binding
///
/// Each [`get_weather_forecast`](Self::get_weather_forecast) issues exactly
/// one request; nothing is cached, deduplicated or retried.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    inner: Client,
    http: reqwest::Client,
    config: ClientConfig,
}

impl ForecastClient {
    /// Create a client for the service at `config.base_url`
    pub fn new(config: ClientConfig) -> Result<Self, ForecastError> {
        // Rustls cannot pick a provider on its own; the workspace standardises
        // on ring. An already-installed provider is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ForecastError::Config {
            message: e.to_string(),
        })?;

        let base_url = config.base_url.trim_end_matches('/');
        Ok(Self {
            inner: Client::new_with_client(base_url, http.clone()),
            http,
            config,
        })
    }

    /// Access the underlying Progenitor client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// The HTTP client requests are sent with
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the current forecasts
    ///
    /// The request is sent when the returned call is first polled. Use
    /// [`ForecastCall::cancel_handle`] to abort it.
    pub fn get_weather_forecast(&self) -> ForecastCall<Vec<types::WeatherForecast>> {
        let http = self.http.clone();
        let url = self.url("/WeatherForecast");
        ForecastCall::new(async move {
            tracing::debug!(%url, "requesting weather forecast");
            let response = http.get(&url).send().await.map_err(ForecastError::transport)?;
            let forecasts: Vec<types::WeatherForecast> =
                ForecastError::read_response(response).await?;
            tracing::debug!(count = forecasts.len(), "received weather forecast");
            Ok(forecasts)
        })
    }

    /// Check the service is up
    pub async fn health(&self) -> Result<types::HealthResponse, ForecastError> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ForecastError::transport)?;
        ForecastError::read_response(response).await
    }

    /// Absolute URL for an API path
    ///
    /// Requests are sent on the shared HTTP client rather than through the
    /// generated builders, so the status is classified before the body is
    /// decoded (see [`ForecastError::Server`]).
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.baseurl(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progenitor_client::ClientInfo as _;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://localhost:5133").with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, "http://localhost:5133");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert_eq!(ClientConfig::new("http://x").timeout, None);
    }

    #[test]
    fn test_trailing_slash_is_dropped_from_base_url() {
        let client = ForecastClient::new(ClientConfig::new("http://localhost:5133/")).unwrap();
        assert_eq!(client.inner().baseurl(), "http://localhost:5133");
        assert_eq!(client.config().base_url, "http://localhost:5133/");
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ForecastClient::new(ClientConfig::new("http://localhost:5133/")).unwrap();
        assert_eq!(
            client.url("/WeatherForecast"),
            "http://localhost:5133/WeatherForecast"
        );
    }

    #[test]
    fn test_decodes_date_time_payload() {
        let forecasts: Vec<types::WeatherForecast> = serde_json::from_str(
            r#"[{"date":"2024-01-01T00:00:00","temperatureC":20,"temperatureF":68,"summary":"Mild"}]"#,
        )
        .unwrap();

        assert_eq!(forecasts[0].date.as_str(), "2024-01-01T00:00:00");
        assert_eq!(
            forecasts[0].date.date(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_decodes_reference_payload() {
        let forecasts: Vec<types::WeatherForecast> = serde_json::from_str(
            r#"[{"date":"2024-01-01","temperatureC":20,"temperatureF":68,"summary":"Mild"}]"#,
        )
        .unwrap();

        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].date.to_string(), "2024-01-01");
        assert_eq!(forecasts[0].temperature_c, 20);
        assert_eq!(forecasts[0].temperature_f, 68);
        assert_eq!(forecasts[0].summary.as_deref(), Some("Mild"));
    }
}
