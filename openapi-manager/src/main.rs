// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! OpenAPI document manager
//!
//! Keeps `openapi-specs/generated/` in step with the API traits. Client
//! crates generate their code from these documents at build time, so run
//! `cargo run -p openapi-manager -- generate` after changing an API trait.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use dropshot_api_manager::{Environment, ManagedApiConfig, ManagedApis};
use dropshot_api_manager_types::{ManagedApiMetadata, Versions};
use std::process::ExitCode;

fn environment() -> Result<Environment> {
    let workspace_root = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .context("openapi-manager has no parent directory")?
        .to_path_buf();

    let env = Environment::new(
        "cargo run -p openapi-manager --".to_string(),
        workspace_root,
        "openapi-specs/generated",
    )?;
    Ok(env)
}

fn all_apis() -> Result<ManagedApis> {
    let apis = vec![ManagedApiConfig {
        ident: "weather-forecast-api",
        versions: Versions::Lockstep {
            version: weather_forecast_api::API_VERSION,
        },
        title: weather_forecast_api::API_TITLE,
        metadata: ManagedApiMetadata {
            description: Some(weather_forecast_api::API_DESCRIPTION),
            ..ManagedApiMetadata::default()
        },
        api_description: weather_forecast_api::weather_forecast_api_mod::stub_api_description,
    }];

    let managed_apis = ManagedApis::new(apis).context("error creating ManagedApis")?;
    Ok(managed_apis)
}

fn main() -> Result<ExitCode> {
    let app = dropshot_api_manager::App::parse();
    let env = environment()?;
    let apis = all_apis()?;

    Ok(app.exec(&env, &apis))
}
