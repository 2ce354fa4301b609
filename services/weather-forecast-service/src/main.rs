// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Weather forecast service
//!
//! Run with:
//! ```bash
//! cargo run -p weather-forecast-service
//! ```
//!
//! Then fetch forecasts with the CLI:
//! ```bash
//! cargo run -p forecast-cli -- --base-url http://localhost:5133
//! ```

use anyhow::Result;
use dropshot::{ConfigLogging, ConfigLoggingLevel};
use tracing::info;
use weather_forecast_service::{ServiceConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "weather_forecast_service=info,dropshot=info".to_string()),
        ))
        .init();

    let config = ServiceConfig::from_env()?;

    let config_logging = ConfigLogging::StderrTerminal {
        level: ConfigLoggingLevel::Info,
    };

    let server = start_server(&config, &config_logging)?;

    info!(
        forecast_days = config.forecast_days,
        "Weather forecast service running on http://{}",
        server.local_addr()
    );
    info!("Forecasts available at http://{}/WeatherForecast", server.local_addr());

    server
        .await
        .map_err(|error| anyhow::anyhow!("server failed: {}", error))
}
