use async_trait::async_trait;
use futures::future::join_all;
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, warn};

use crate::{
    Config,
    error::FetchError,
    model::{CityQuery, WeatherRecord},
    provider::weatherstack::WeatherstackClient,
};

pub mod weatherstack;

/// Result of fetching one city: a record or the reason there is none.
pub type FetchOutcome = Result<WeatherRecord, FetchError>;

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// One request for one city. No retries.
    async fn fetch_one(&self, query: &CityQuery) -> FetchOutcome;
}

/// Fetch every city concurrently and wait for all of them to settle.
///
/// All-or-nothing: if any city fails, the whole batch fails with the
/// failure of the earliest city in `queries` order, and no records are
/// returned. On success the records follow `queries` order.
pub async fn fetch_all(
    source: &dyn WeatherSource,
    queries: &[CityQuery],
) -> Result<Vec<WeatherRecord>, FetchError> {
    debug!(cities = queries.len(), "fetching all cities");

    let outcomes = join_all(queries.iter().map(|query| source.fetch_one(query))).await;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut first_failure = None;

    for (query, outcome) in queries.iter().zip(outcomes) {
        match outcome {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(city = %query, kind = err.kind(), error = %err, "weather fetch failed");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(records),
    }
}

/// Construct the weather source described by `config`.
///
/// A missing API key is passed through as an empty key; the provider's
/// rejection then surfaces as an ordinary fetch failure.
pub fn source_from_config(config: &Config) -> Arc<dyn WeatherSource> {
    Arc::new(WeatherstackClient::with_endpoint(
        config.api_key().to_owned(),
        config.endpoint().to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct ScriptedSource {
        failing: Vec<(&'static str, u16)>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherSource for ScriptedSource {
        async fn fetch_one(&self, query: &CityQuery) -> FetchOutcome {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(query.to_string());
            }

            let failing = self.failing.iter().find(|(name, _)| *name == query.as_str());
            if let Some((_, status)) = failing {
                return Err(FetchError::HttpStatus { status: *status });
            }

            Ok(WeatherRecord {
                location_name: query.to_string(),
                location_country: "Somewhere".into(),
                temperature: 10.0,
                humidity_pct: 50.0,
                wind_speed: 3.0,
                cloud_cover_pct: 20.0,
            })
        }
    }

    fn queries(names: &[&str]) -> Vec<CityQuery> {
        names.iter().copied().map(CityQuery::new).collect()
    }

    #[tokio::test]
    async fn all_successes_keep_query_order() {
        let source = ScriptedSource::default();
        let records = fetch_all(&source, &queries(&["Paris", "Tokyo", "Lima"])).await.unwrap();

        let names: Vec<_> = records.iter().map(|r| r.location_name.as_str()).collect();
        assert_eq!(names, ["Paris", "Tokyo", "Lima"]);
    }

    #[tokio::test]
    async fn any_failure_fails_the_batch_with_earliest_city_error() {
        let source = ScriptedSource {
            failing: vec![("Lima", 404), ("Tokyo", 500)],
            ..Default::default()
        };

        let err = fetch_all(&source, &queries(&["Paris", "Tokyo", "Lima"])).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(source.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_query_list_yields_no_records() {
        let source = ScriptedSource::default();
        let records = fetch_all(&source, &[]).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn source_from_config_uses_configured_endpoint() {
        let mut cfg = Config::default();
        cfg.endpoint = Some("http://localhost:9/current".into());

        let source = source_from_config(&cfg);
        assert!(format!("{source:?}").contains("http://localhost:9/current"));
    }
}
