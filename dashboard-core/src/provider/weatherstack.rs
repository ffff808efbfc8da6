use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{CityQuery, WeatherRecord},
};

use super::{FetchOutcome, WeatherSource};

/// Current-conditions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://api.weatherstack.com/current";

#[derive(Clone)]
pub struct WeatherstackClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

// Keeps the access key out of debug output.
impl fmt::Debug for WeatherstackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherstackClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl WeatherstackClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_current(&self, query: &CityQuery) -> FetchOutcome {
        debug!(city = %query, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("access_key", self.api_key.as_str()), ("query", query.as_str())])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus { status: status.as_u16() });
        }

        parse_current(&body)
    }
}

/// Interpret a success-status body. An `error` object wins over any data
/// that may also be present.
fn parse_current(body: &str) -> FetchOutcome {
    let parsed: WsResponse = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        detail: format!("{e}; body: {}", truncate_body(body)),
    })?;

    if let Some(error) = parsed.error {
        let info = error.info.filter(|info| !info.trim().is_empty());
        return Err(FetchError::Provider { info: info.unwrap_or_else(|| "API Error".to_string()) });
    }

    let (location, current) = match (parsed.location, parsed.current) {
        (Some(location), Some(current)) => (location, current),
        _ => {
            return Err(FetchError::Parse {
                detail: format!("missing location or current data; body: {}", truncate_body(body)),
            });
        }
    };

    Ok(WeatherRecord {
        location_name: location.name,
        location_country: location.country,
        temperature: current.temperature,
        humidity_pct: current.humidity,
        wind_speed: current.wind_speed,
        cloud_cover_pct: current.cloudcover,
    })
}

#[derive(Debug, Deserialize)]
struct WsLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    cloudcover: f64,
}

#[derive(Debug, Deserialize)]
struct WsError {
    info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WsResponse {
    location: Option<WsLocation>,
    current: Option<WsCurrent>,
    error: Option<WsError>,
}

#[async_trait]
impl WeatherSource for WeatherstackClient {
    async fn fetch_one(&self, query: &CityQuery) -> FetchOutcome {
        self.fetch_current(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "request": {"type": "City", "query": "London, United Kingdom"},
        "location": {"name": "London", "country": "United Kingdom", "region": "City of London"},
        "current": {"temperature": 15, "humidity": 80, "wind_speed": 10, "cloudcover": 90}
    }"#;

    #[test]
    fn parses_location_and_current_fields() {
        let record = parse_current(LONDON).expect("valid payload");

        assert_eq!(record.location_name, "London");
        assert_eq!(record.location_country, "United Kingdom");
        assert_eq!(record.temperature, 15.0);
        assert_eq!(record.humidity_pct, 80.0);
        assert_eq!(record.wind_speed, 10.0);
        assert_eq!(record.cloud_cover_pct, 90.0);
    }

    #[test]
    fn error_payload_uses_provider_info() {
        let body = r#"{"success": false, "error": {"code": 101, "type": "invalid_access_key",
            "info": "You have not supplied a valid API Access Key."}}"#;

        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, FetchError::Provider { .. }));
        assert_eq!(err.to_string(), "You have not supplied a valid API Access Key.");
    }

    #[test]
    fn error_payload_without_info_falls_back() {
        let err = parse_current(r#"{"success": false, "error": {"code": 615}}"#).unwrap_err();
        assert_eq!(err.to_string(), "API Error");
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let err = parse_current("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn missing_current_block_is_a_parse_error() {
        let body = r#"{"location": {"name": "Oslo", "country": "Norway"}}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn debug_output_hides_access_key() {
        let client = WeatherstackClient::new("SECRET_KEY".into());
        let out = format!("{client:?}");
        assert!(out.contains(DEFAULT_ENDPOINT));
        assert!(!out.contains("SECRET_KEY"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
