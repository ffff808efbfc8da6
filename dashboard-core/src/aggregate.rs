use crate::model::{SummaryStatistics, WeatherRecord};

/// Arithmetic mean of temperature, humidity and wind speed across `records`.
pub fn summarize(records: &[WeatherRecord]) -> SummaryStatistics {
    if records.is_empty() {
        return SummaryStatistics::default();
    }

    let count = records.len() as f64;
    let mean = |field: fn(&WeatherRecord) -> f64| records.iter().map(field).sum::<f64>() / count;

    SummaryStatistics {
        avg_temperature: mean(|r| r.temperature),
        avg_humidity: mean(|r| r.humidity_pct),
        avg_wind_speed: mean(|r| r.wind_speed),
    }
}
