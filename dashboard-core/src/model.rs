use serde::{Deserialize, Serialize};
use std::fmt;

/// Cities fetched when the configuration does not list any.
pub const DEFAULT_CITIES: &[&str] = &["London", "New York", "Tokyo", "Paris", "Sydney", "Dubai"];

/// A city name used verbatim as the provider's query term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn defaults() -> Vec<CityQuery> {
        DEFAULT_CITIES.iter().copied().map(CityQuery::new).collect()
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CityQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Current conditions for one city, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub location_country: String,
    pub temperature: f64,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub cloud_cover_pct: f64,
}

/// Means over every held record. All zero when there are no records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SummaryStatistics {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
}
