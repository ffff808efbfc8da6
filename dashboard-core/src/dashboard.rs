//! Dashboard state machine.
//!
//! The controller owns the only copy of [`DashboardState`]. Every change
//! builds a whole new state and publishes it over a watch channel, so a
//! reader never sees a half-applied update.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::{
    aggregate::summarize,
    filter::{CloudCoverBand, FilterState, TemperatureBand, filter},
    model::{CityQuery, SummaryStatistics, WeatherRecord},
    provider::{WeatherSource, fetch_all},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub phase: Phase,
    pub error: Option<String>,
    pub records: Vec<WeatherRecord>,
    pub filter: FilterState,
    /// When the fetch cycle settled.
    pub updated_at: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Derived values for display.
    ///
    /// The summary covers every stored record; only `records` is filtered.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            loading: self.is_loading(),
            error: self.error.clone(),
            summary: summarize(&self.records),
            records: filter(&self.records, &self.filter),
            total: self.records.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub error: Option<String>,
    pub summary: SummaryStatistics,
    pub records: Vec<WeatherRecord>,
    /// Number of stored records before filtering.
    pub total: usize,
}

pub struct DashboardController {
    source: Arc<dyn WeatherSource>,
    cities: Vec<CityQuery>,
    state: watch::Sender<DashboardState>,
}

impl DashboardController {
    pub fn new(source: Arc<dyn WeatherSource>, cities: Vec<CityQuery>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self { source, cities, state }
    }

    pub fn cities(&self) -> &[CityQuery] {
        &self.cities
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> DashboardView {
        self.state.borrow().view()
    }

    /// Run the single fetch cycle.
    ///
    /// Only the first call fetches. Later calls leave the state alone and
    /// return the current phase; an errored dashboard is never retried.
    pub async fn start(&self) -> Phase {
        let phase = self.state.borrow().phase;
        if phase != Phase::Idle {
            return phase;
        }

        self.replace_state(|state| DashboardState { phase: Phase::Loading, error: None, ..state });
        info!(cities = self.cities.len(), "loading weather data");

        match fetch_all(self.source.as_ref(), &self.cities).await {
            Ok(records) => {
                info!(records = records.len(), "weather data ready");
                self.replace_state(|state| DashboardState {
                    phase: Phase::Ready,
                    error: None,
                    records,
                    updated_at: Some(Utc::now()),
                    ..state
                });
                Phase::Ready
            }
            Err(err) => {
                info!(error = %err, "weather data failed to load");
                self.replace_state(|state| DashboardState {
                    phase: Phase::Errored,
                    error: Some(err.to_string()),
                    records: Vec::new(),
                    updated_at: Some(Utc::now()),
                    ..state
                });
                Phase::Errored
            }
        }
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        let search_text = text.into();
        self.replace_filter(|filter| FilterState { search_text, ..filter });
    }

    pub fn set_temperature_band(&self, temperature: TemperatureBand) {
        self.replace_filter(|filter| FilterState { temperature, ..filter });
    }

    pub fn set_cloud_cover_band(&self, cloud_cover: CloudCoverBand) {
        self.replace_filter(|filter| FilterState { cloud_cover, ..filter });
    }

    fn replace_filter(&self, update: impl FnOnce(FilterState) -> FilterState) {
        self.replace_state(|state| DashboardState {
            filter: update(state.filter.clone()),
            ..state
        });
    }

    /// Swap in a new state built from the current one, under the channel's write lock.
    fn replace_state(&self, update: impl FnOnce(DashboardState) -> DashboardState) {
        self.state.send_modify(|state| *state = update(std::mem::take(state)));
    }
}
