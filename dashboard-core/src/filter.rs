//! Search and band filters over fetched records.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::model::WeatherRecord;

/// Temperatures strictly above this are hot; at or below are cold.
pub const HOT_ABOVE: f64 = 20.0;

/// Cloud cover strictly above this percentage is cloudy; at or below is clear.
pub const CLOUDY_ABOVE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    #[default]
    All,
    Hot,
    Cold,
}

impl TemperatureBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::All => "all",
            TemperatureBand::Hot => "hot",
            TemperatureBand::Cold => "cold",
        }
    }

    pub const fn all() -> &'static [TemperatureBand] {
        &[TemperatureBand::All, TemperatureBand::Hot, TemperatureBand::Cold]
    }

    pub fn matches(&self, temperature: f64) -> bool {
        match self {
            TemperatureBand::All => true,
            TemperatureBand::Hot => temperature > HOT_ABOVE,
            TemperatureBand::Cold => temperature <= HOT_ABOVE,
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureBand {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(TemperatureBand::All),
            "hot" => Ok(TemperatureBand::Hot),
            "cold" => Ok(TemperatureBand::Cold),
            _ => Err(anyhow!(
                "Unknown temperature band '{value}'. Supported bands: all, hot, cold."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudCoverBand {
    #[default]
    All,
    Cloudy,
    Clear,
}

impl CloudCoverBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudCoverBand::All => "all",
            CloudCoverBand::Cloudy => "cloudy",
            CloudCoverBand::Clear => "clear",
        }
    }

    pub const fn all() -> &'static [CloudCoverBand] {
        &[CloudCoverBand::All, CloudCoverBand::Cloudy, CloudCoverBand::Clear]
    }

    pub fn matches(&self, cloud_cover_pct: f64) -> bool {
        match self {
            CloudCoverBand::All => true,
            CloudCoverBand::Cloudy => cloud_cover_pct > CLOUDY_ABOVE,
            CloudCoverBand::Clear => cloud_cover_pct <= CLOUDY_ABOVE,
        }
    }
}

impl fmt::Display for CloudCoverBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CloudCoverBand {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(CloudCoverBand::All),
            "cloudy" => Ok(CloudCoverBand::Cloudy),
            "clear" => Ok(CloudCoverBand::Clear),
            _ => Err(anyhow!(
                "Unknown cloud cover band '{value}'. Supported bands: all, cloudy, clear."
            )),
        }
    }
}

/// User-editable search text and band selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub temperature: TemperatureBand,
    pub cloud_cover: CloudCoverBand,
}

impl FilterState {
    pub fn matches(&self, record: &WeatherRecord) -> bool {
        self.matches_with_needle(record, &self.search_text.to_lowercase())
    }

    fn matches_with_needle(&self, record: &WeatherRecord, needle: &str) -> bool {
        record.location_name.to_lowercase().contains(needle)
            && self.temperature.matches(record.temperature)
            && self.cloud_cover.matches(record.cloud_cover_pct)
    }
}

/// Records matching every predicate of `state`, in their original order.
pub fn filter(records: &[WeatherRecord], state: &FilterState) -> Vec<WeatherRecord> {
    let needle = state.search_text.to_lowercase();

    records
        .iter()
        .filter(|record| state.matches_with_needle(record, &needle))
        .cloned()
        .collect()
}
