// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Weather Forecast API
//!
//! Trait-based Dropshot definition of the forecast service. The service
//! implements [`WeatherForecastApi`]; `openapi-manager` renders the stub
//! description into `openapi-specs/generated/weather-forecast-api.json`,
//! which the Progenitor client is generated from.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dropshot::{HttpError, HttpResponseOk, RequestContext};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// API title as it appears in the OpenAPI document
pub const API_TITLE: &str = "Weather Forecast API";

/// Description embedded in the OpenAPI document
pub const API_DESCRIPTION: &str = "Mock weather forecasts for OpenAPI client generation";

/// Lockstep version of the API
pub const API_VERSION: semver::Version = semver::Version::new(1, 0, 0);

/// Vocabulary the provider draws forecast summaries from
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Convert degrees Celsius to degrees Fahrenheit, rounded to the nearest
/// whole degree.
///
/// `C * 9 / 5` always has a fractional part that is a multiple of 0.2, so
/// there is no tie to break. Readings too large for an `i32` in
/// Fahrenheit saturate.
pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    let scaled = i64::from(celsius) * 9;
    let rounded = if scaled >= 0 {
        (scaled + 2) / 5
    } else {
        (scaled - 2) / 5
    };
    i32::try_from(32 + rounded).unwrap_or(if rounded < 0 { i32::MIN } else { i32::MAX })
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Text that is neither an ISO-8601 date nor an ISO-8601 date-time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an ISO-8601 date or date-time: {0:?}")]
pub struct InvalidForecastDate(String);

/// The day a forecast applies to
///
/// On the wire this is either a calendar date (`2024-01-01`) or an
/// ISO-8601 date-time (`2024-01-01T00:00:00`, `2024-01-01T06:00:00+02:00`).
/// The text is kept verbatim, so a decoded record serializes back to what
/// the server sent; [`ForecastDate::date`] gives the calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastDate {
    text: String,
    date: NaiveDate,
}

impl ForecastDate {
    /// Calendar day, in the time zone the text was written in
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<NaiveDate> for ForecastDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            text: date.to_string(),
            date,
        }
    }
}

impl FromStr for ForecastDate {
    type Err = InvalidForecastDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = s
            .parse::<NaiveDate>()
            .or_else(|_| s.parse::<NaiveDateTime>().map(|dt| dt.date()))
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
            .map_err(|_| InvalidForecastDate(s.to_string()))?;
        Ok(Self {
            text: s.to_string(),
            date,
        })
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for ForecastDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ForecastDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for ForecastDate {
    fn schema_name() -> String {
        "ForecastDate".to_string()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::schema::Schema {
        schemars::schema::SchemaObject {
            metadata: Some(Box::new(schemars::schema::Metadata {
                description: Some(
                    "ISO-8601 calendar date or date-time the forecast applies to".to_string(),
                ),
                ..Default::default()
            })),
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        }
        .into()
    }
}

/// A single day's forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Day the forecast applies to
    pub date: ForecastDate,
    /// Temperature in degrees Celsius
    pub temperature_c: i32,
    /// Temperature in degrees Fahrenheit, derived from `temperatureC`
    pub temperature_f: i32,
    /// Short description of the weather
    pub summary: Option<String>,
}

impl WeatherForecast {
    /// Build a forecast, deriving the Fahrenheit reading from Celsius
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date: ForecastDate::from(date),
            temperature_c,
            temperature_f: celsius_to_fahrenheit(temperature_c),
            summary,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Service status, "ok" when serving
    pub status: String,
    /// Service version
    pub version: String,
}

/// Weather Forecast API Trait
///
/// Implementations provide the handler context and the forecast source.
#[dropshot::api_description]
pub trait WeatherForecastApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    /// Get weather forecasts
    ///
    /// Returns a freshly generated forecast for each upcoming day.
    #[endpoint {
        method = GET,
        path = "/WeatherForecast",
        tags = ["forecast"],
    }]
    async fn get_weather_forecast(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<WeatherForecast>>, HttpError>;

    /// Health check
    #[endpoint {
        method = GET,
        path = "/health",
        tags = ["system"],
    }]
    async fn health(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<HealthResponse>, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_fahrenheit_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(0), 32);
        assert_eq!(celsius_to_fahrenheit(100), 212);
        assert_eq!(celsius_to_fahrenheit(-40), -40);
        assert_eq!(celsius_to_fahrenheit(20), 68);
        assert_eq!(celsius_to_fahrenheit(37), 99);
    }

    #[test]
    fn test_celsius_to_fahrenheit_rounds_to_nearest() {
        // 1 C = 33.8 F, -1 C = 30.2 F, 3 C = 37.4 F, -3 C = 26.6 F
        assert_eq!(celsius_to_fahrenheit(1), 34);
        assert_eq!(celsius_to_fahrenheit(-1), 30);
        assert_eq!(celsius_to_fahrenheit(3), 37);
        assert_eq!(celsius_to_fahrenheit(-3), 27);
        // -20 C is exactly -4 F
        assert_eq!(celsius_to_fahrenheit(-20), -4);
    }

    #[test]
    fn test_forecast_uses_camel_case_wire_names() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let forecast = WeatherForecast::new(date, 20, Some("Mild".to_string()));
        let json = serde_json::to_value(&forecast).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-01-01",
                "temperatureC": 20,
                "temperatureF": 68,
                "summary": "Mild",
            })
        );
    }

    #[test]
    fn test_forecast_accepts_null_summary() {
        let forecast: WeatherForecast = serde_json::from_str(
            r#"{"date":"2024-06-30","temperatureC":-5,"temperatureF":23,"summary":null}"#,
        )
        .unwrap();
        assert_eq!(forecast.summary, None);
        assert_eq!(forecast.temperature_f, 23);
    }

    #[test]
    fn test_forecast_date_accepts_date_and_date_time() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for text in [
            "2024-01-01",
            "2024-01-01T00:00:00",
            "2024-01-01T23:59:59.9999999",
            "2024-01-01T06:00:00+02:00",
            "2024-01-01T00:00:00Z",
        ] {
            let parsed: ForecastDate = text.parse().unwrap();
            assert_eq!(parsed.date(), day, "{text}");
            assert_eq!(parsed.as_str(), text);
        }

        assert!("January 1st".parse::<ForecastDate>().is_err());
        assert!("2024-13-01".parse::<ForecastDate>().is_err());
        assert!("".parse::<ForecastDate>().is_err());
    }

    #[test]
    fn test_forecast_with_date_time_keeps_wire_text() {
        let wire = serde_json::json!({
            "date": "2024-01-01T00:00:00",
            "temperatureC": 20,
            "temperatureF": 68,
            "summary": "Mild",
        });
        let forecast: WeatherForecast = serde_json::from_value(wire.clone()).unwrap();

        assert_eq!(forecast.date.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(serde_json::to_value(&forecast).unwrap(), wire);
    }

    #[test]
    fn test_forecast_rejects_malformed_date() {
        let result: Result<WeatherForecast, _> = serde_json::from_str(
            r#"{"date":"yesterday","temperatureC":0,"temperatureF":32,"summary":null}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_stub_description_documents_forecast_route() {
        let api = weather_forecast_api_mod::stub_api_description().unwrap();
        let doc = api
            .openapi(API_TITLE, API_VERSION)
            .json()
            .unwrap();

        let op = &doc["paths"]["/WeatherForecast"]["get"];
        assert_eq!(op["operationId"], "get_weather_forecast");
        assert!(doc["components"]["schemas"]["WeatherForecast"].is_object());
        let date = &doc["components"]["schemas"]["WeatherForecast"]["properties"]["date"];
        let date_ref = date.get("$ref").unwrap_or(&date["allOf"][0]["$ref"]);
        assert_eq!(date_ref, "#/components/schemas/ForecastDate");
        assert_eq!(doc["components"]["schemas"]["ForecastDate"]["type"], "string");
        assert_eq!(doc["paths"]["/health"]["get"]["operationId"], "health");
    }
}
