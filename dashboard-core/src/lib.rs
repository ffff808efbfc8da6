//! Core library for the city weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Concurrent per-city fetching from the weather provider
//! - Summary statistics and search/band filtering over fetched records
//! - The dashboard state machine the presentation layer renders from
//!
//! It is used by `dashboard-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod model;
pub mod provider;

pub use aggregate::summarize;
pub use config::Config;
pub use dashboard::{DashboardController, DashboardState, DashboardView, Phase};
pub use error::FetchError;
pub use filter::{CloudCoverBand, FilterState, TemperatureBand, filter};
pub use model::{CityQuery, SummaryStatistics, WeatherRecord};
pub use provider::{
    FetchOutcome, WeatherSource, fetch_all, source_from_config, weatherstack::WeatherstackClient,
};
