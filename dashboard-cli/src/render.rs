use chrono::{DateTime, Utc};
use dashboard_core::{DashboardView, WeatherRecord};

pub const API_KEY_HINT: &str = "Please check your API key and try again.";

/// Plain-text dashboard: summary tiles, then the filtered city list.
pub fn render_view(view: &DashboardView, updated_at: Option<DateTime<Utc>>) -> String {
    let mut lines = vec!["Weather Dashboard".to_string()];

    if view.loading {
        lines.push("Loading data...".to_string());
    }
    if let Some(ts) = updated_at {
        lines.push(format!("Updated {}", ts.format("%Y-%m-%d %H:%M:%S UTC")));
    }

    let summary = &view.summary;
    lines.extend([
        String::new(),
        format!("Average Temperature  {:.1}°C", summary.avg_temperature),
        format!("Average Humidity     {:.1}%", summary.avg_humidity),
        format!("Average Wind Speed   {:.1} km/h", summary.avg_wind_speed),
        String::new(),
        format!("Showing {} of {} cities", view.records.len(), view.total),
    ]);
    lines.extend(view.records.iter().map(render_record));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_record(record: &WeatherRecord) -> String {
    format!(
        "  {:<14} {:<16} {:>5.1}°C  {:>3.0}% humidity  {:>5.1} km/h  {:>3.0}% cloud",
        record.location_name,
        record.location_country,
        record.temperature,
        record.humidity_pct,
        record.wind_speed,
        record.cloud_cover_pct,
    )
}

/// Replaces the whole dashboard when loading failed.
pub fn render_error(message: &str) -> String {
    format!("Error Loading Weather Data\n{message}\n\n{API_KEY_HINT}")
}
