use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dashboard_core::{
    CloudCoverBand, Config, DashboardController, Phase, TemperatureBand, config::API_KEY_ENV,
    source_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use tracing::warn;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Current weather across a set of cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherstack API key in the config file.
    Configure,

    /// Fetch every configured city once and print the dashboard.
    Show {
        /// Case-insensitive substring of the city name.
        #[arg(long, default_value = "")]
        search: String,

        /// Temperature band: all, hot (>20°C) or cold (<=20°C).
        #[arg(long, default_value = "all")]
        temp: String,

        /// Cloud cover band: all, cloudy (>50%) or clear (<=50%).
        #[arg(long, default_value = "all")]
        cloud: String,

        /// Print the dashboard view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch once, then edit the search and filters interactively.
    Browse,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { search, temp, cloud, json } => show(search, &temp, &cloud, json).await,
            Command::Browse => browse().await,
        }
    }
}

fn configure() -> Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("weatherstack API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save_to(&path)?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

fn load_dashboard() -> Result<DashboardController> {
    let config = Config::load()?;

    if !config.is_api_key_configured() {
        warn!("no API key configured; run `weather-dashboard configure` or set {API_KEY_ENV}");
    }

    Ok(DashboardController::new(source_from_config(&config), config.city_queries()))
}

async fn show(search: String, temp: &str, cloud: &str, json: bool) -> Result<()> {
    let temperature = TemperatureBand::try_from(temp)?;
    let cloud_cover = CloudCoverBand::try_from(cloud)?;

    let dashboard = load_dashboard()?;
    dashboard.start().await;

    dashboard.set_search_text(search);
    dashboard.set_temperature_band(temperature);
    dashboard.set_cloud_cover_band(cloud_cover);

    let state = dashboard.snapshot();
    let view = state.view();

    if json {
        let out =
            serde_json::to_string_pretty(&view).context("Failed to serialize dashboard view")?;
        println!("{out}");
    }

    if let Some(message) = &view.error {
        bail!("{}", render::render_error(message));
    }

    if !json {
        print!("{}", render::render_view(&view, state.updated_at));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum BrowseAction {
    Search,
    Temperature,
    CloudCover,
    Quit,
}

impl BrowseAction {
    const fn all() -> &'static [BrowseAction] {
        &[
            BrowseAction::Search,
            BrowseAction::Temperature,
            BrowseAction::CloudCover,
            BrowseAction::Quit,
        ]
    }
}

impl fmt::Display for BrowseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BrowseAction::Search => "Search cities",
            BrowseAction::Temperature => "Filter by temperature",
            BrowseAction::CloudCover => "Filter by cloud cover",
            BrowseAction::Quit => "Quit",
        })
    }
}

async fn browse() -> Result<()> {
    let dashboard = load_dashboard()?;
    let mut updates = dashboard.subscribe();

    if dashboard.start().await == Phase::Errored {
        let message = dashboard.snapshot().error.unwrap_or_default();
        bail!("{}", render::render_error(&message));
    }

    loop {
        let state = updates.borrow_and_update().clone();
        println!();
        print!("{}", render::render_view(&state.view(), state.updated_at));

        let Some(action) = answer(Select::new("What next?", BrowseAction::all().to_vec()).prompt())?
        else {
            break;
        };

        match action {
            BrowseAction::Search => {
                let prompt = Text::new("Search cities:")
                    .with_initial_value(&state.filter.search_text)
                    .prompt();
                if let Some(text) = answer(prompt)? {
                    dashboard.set_search_text(text);
                }
            }
            BrowseAction::Temperature => {
                let prompt = Select::new("Temperature:", TemperatureBand::all().to_vec()).prompt();
                if let Some(band) = answer(prompt)? {
                    dashboard.set_temperature_band(band);
                }
            }
            BrowseAction::CloudCover => {
                let prompt = Select::new("Cloud cover:", CloudCoverBand::all().to_vec()).prompt();
                if let Some(band) = answer(prompt)? {
                    dashboard.set_cloud_cover_band(band);
                }
            }
            BrowseAction::Quit => break,
        }
    }

    Ok(())
}

/// Escape or Ctrl-C yields `None` instead of an error.
fn answer<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}
