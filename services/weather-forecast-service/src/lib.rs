// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Weather forecast provider
//!
//! A Dropshot server implementing [`WeatherForecastApi`]. Every request to
//! `GET /WeatherForecast` generates a fresh set of random forecasts; nothing
//! is stored between requests. The data is illustrative only: the
//! temperature range and summary choice carry no meaning beyond giving
//! clients something shaped like a forecast.
//!
//! The crate is a library so integration tests (and other crates' tests)
//! can start the provider in-process with [`start_server`].

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use dropshot::{
    ApiDescription, ConfigDropshot, ConfigLogging, HttpError, HttpResponseOk, HttpServer,
    HttpServerStarter, RequestContext,
};
use rand::Rng;
use std::net::SocketAddr;
use std::ops::Range;
use weather_forecast_api::{HealthResponse, SUMMARIES, WeatherForecast, WeatherForecastApi};

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5133";

/// Default number of forecasts per response
pub const DEFAULT_FORECAST_DAYS: u32 = 5;

/// Celsius readings are drawn uniformly from this range
const TEMPERATURE_RANGE_C: Range<i32> = -20..55;

// ============================================================================
// Configuration
// ============================================================================

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,
    /// Number of forecasts returned per request
    pub forecast_days: u32,
}

impl ServiceConfig {
    /// Load configuration from the process environment
    ///
    /// - `BIND_ADDRESS`: listen address (default `127.0.0.1:5133`)
    /// - `FORECAST_DAYS`: records per response (default 5)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse()
            .context("BIND_ADDRESS is not a valid socket address")?;

        let forecast_days = match lookup("FORECAST_DAYS") {
            Some(days) => days
                .trim()
                .parse()
                .with_context(|| format!("FORECAST_DAYS is not a valid count: {:?}", days))?,
            None => DEFAULT_FORECAST_DAYS,
        };

        Ok(Self {
            bind_address,
            forecast_days,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 5133)),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

// ============================================================================
// Forecast Generation
// ============================================================================

/// Generate `days` forecasts, dated consecutively starting the day after
/// `today`.
pub fn generate_forecasts<R: Rng>(
    rng: &mut R,
    today: NaiveDate,
    days: u32,
) -> Vec<WeatherForecast> {
    (1..=days)
        .filter_map(|offset| {
            let date = today.checked_add_days(Days::new(u64::from(offset)))?;
            let temperature_c = rng.random_range(TEMPERATURE_RANGE_C);
            let summary = SUMMARIES[rng.random_range(0..SUMMARIES.len())];
            Some(WeatherForecast::new(
                date,
                temperature_c,
                Some(summary.to_string()),
            ))
        })
        .collect()
}

// ============================================================================
// API Implementation
// ============================================================================

/// Context for API handlers
#[derive(Debug)]
pub struct ForecastContext {
    forecast_days: u32,
}

impl ForecastContext {
    pub fn new(forecast_days: u32) -> Self {
        Self { forecast_days }
    }

    pub fn forecast_days(&self) -> u32 {
        self.forecast_days
    }
}

/// Weather forecast service implementation
pub enum WeatherForecastServiceImpl {}

impl WeatherForecastApi for WeatherForecastServiceImpl {
    type Context = ForecastContext;

    async fn get_weather_forecast(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<WeatherForecast>>, HttpError> {
        let ctx = rqctx.context();
        let today = Utc::now().date_naive();
        let forecasts = generate_forecasts(&mut rand::rng(), today, ctx.forecast_days);

        tracing::info!(
            request_id = %rqctx.request_id,
            count = forecasts.len(),
            "generated forecasts"
        );

        Ok(HttpResponseOk(forecasts))
    }

    async fn health(
        _rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<HealthResponse>, HttpError> {
        Ok(HttpResponseOk(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }))
    }
}

/// Build the API description for the forecast service
pub fn api_description() -> Result<ApiDescription<ForecastContext>> {
    weather_forecast_api::weather_forecast_api_mod::api_description::<WeatherForecastServiceImpl>()
        .map_err(|e| anyhow::anyhow!("Failed to create API description: {}", e))
}

/// Start the forecast server
///
/// Binding to port 0 picks a free port; read it back with
/// `HttpServer::local_addr`.
pub fn start_server(
    config: &ServiceConfig,
    logging: &ConfigLogging,
) -> Result<HttpServer<ForecastContext>> {
    let api = api_description()?;

    let config_dropshot = ConfigDropshot {
        bind_address: config.bind_address,
        default_request_body_max_bytes: 1024 * 1024, // 1MB
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let log = logging
        .to_logger("weather-forecast-service")
        .map_err(|error| anyhow::anyhow!("failed to create logger: {}", error))?;

    let context = ForecastContext::new(config.forecast_days);
    let server = HttpServerStarter::new(&config_dropshot, api, context, &log)
        .map_err(|error| anyhow::anyhow!("failed to create server: {}", error))?
        .start();

    Ok(server)
}
