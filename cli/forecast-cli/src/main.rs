// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Forecast CLI - fetch and display weather forecasts

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;
use weather_forecast_client::{ClientConfig, ForecastClient, ForecastError};

mod output;

/// Exit status after Ctrl-C, as a shell reports SIGINT
const EXIT_CANCELED: u8 = 130;

#[derive(Parser)]
#[command(name = "forecast", version)]
#[command(about = "CLI for the weather forecast service", long_about = None)]
struct Cli {
    /// Base URL of the forecast service
    #[arg(long, env = "FORECAST_URL", default_value = "http://localhost:5133")]
    base_url: String,

    /// Give up on a request after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming forecasts (default)
    List,
    /// Check the service is up
    Health,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.base_url);
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

async fn list(client: &ForecastClient, json: bool) -> Result<ExitCode> {
    let call = client.get_weather_forecast();
    let cancel = call.cancel_handle();

    let result = tokio::select! {
        result = call => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(ForecastError::Canceled)
        }
    };

    let forecasts = match result {
        Ok(forecasts) => forecasts,
        Err(ForecastError::Canceled) => {
            eprintln!("request canceled");
            return Ok(ExitCode::from(EXIT_CANCELED));
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&forecasts)?);
    } else {
        println!("{}", output::forecast_table(&forecasts));
    }
    Ok(ExitCode::SUCCESS)
}

async fn health(client: &ForecastClient, json: bool) -> Result<ExitCode> {
    let health = client.health().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        println!("{} (version {})", health.status, health.version);
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "weather_forecast_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .init();

    let client = ForecastClient::new(cli.client_config())?;
    tracing::debug!(base_url = %cli.base_url, "created forecast client");

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => list(&client, cli.json).await,
        Commands::Health => health(&client, cli.json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_local_service() {
        let cli = Cli::try_parse_from(["forecast"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        let config = cli.client_config();
        assert_eq!(config.timeout, None);
        // FORECAST_URL may be set in the environment running the tests
        assert!(!config.base_url.is_empty());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "forecast",
            "--base-url",
            "http://forecast.example.com",
            "--timeout",
            "3",
            "health",
            "--json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Health)));
        assert!(cli.json);
        assert_eq!(
            cli.client_config(),
            ClientConfig::new("http://forecast.example.com").with_timeout(Duration::from_secs(3))
        );
    }
}
