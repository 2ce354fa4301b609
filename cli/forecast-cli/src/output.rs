// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Output formatting

use comfy_table::{Table, presets::NOTHING};
use weather_forecast_client::types::WeatherForecast;

/// Render forecasts as a table, one row per day
pub fn forecast_table(forecasts: &[WeatherForecast]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(["DATE", "TEMP (C)", "TEMP (F)", "SUMMARY"]);
    for forecast in forecasts {
        table.add_row([
            forecast.date.to_string(),
            forecast.temperature_c.to_string(),
            forecast.temperature_f.to_string(),
            forecast.summary.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}
