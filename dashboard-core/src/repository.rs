//! Forecast fetching for the active query, with last-good payload and error log.

use std::{sync::Arc, time::Duration};

use parking_lot::RwLock;
use tokio::{runtime::Handle, sync::broadcast};
use tracing::{debug, error, info, warn};

use crate::{
    error::{ErrorRecord, FetchError},
    model::LocationData,
    provider::{FORECAST_DAYS, ForecastSource},
    query::{Query, QueryListener},
};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const EVENT_CAPACITY: usize = 32;

/// Published after every completed fetch.
#[derive(Debug, Clone)]
pub enum RepositoryEvent {
    Updated { query: Query, payload: Arc<LocationData> },
    Failed(ErrorRecord),
    /// A successful response arrived for a query that is no longer current.
    Discarded(Query),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    Discarded,
}

#[derive(Debug, Default)]
struct RepositoryState {
    wanted: Option<Query>,
    latest: Option<(Query, Arc<LocationData>)>,
    errors: Vec<ErrorRecord>,
}

impl RepositoryState {
    fn is_current(&self, query: &Query) -> bool {
        self.wanted.as_ref().is_none_or(|wanted| wanted.generation() == query.generation())
    }
}

#[derive(Debug)]
pub struct WeatherRepository {
    source: Arc<dyn ForecastSource>,
    days: u8,
    timeout: Duration,
    state: RwLock<RepositoryState>,
    events: broadcast::Sender<RepositoryEvent>,
}

impl WeatherRepository {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            source,
            days: FORECAST_DAYS,
            timeout: DEFAULT_FETCH_TIMEOUT,
            state: RwLock::new(RepositoryState::default()),
            events,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Most recent payload accepted for a then-current query.
    pub fn latest(&self) -> Option<Arc<LocationData>> {
        self.state.read().latest.as_ref().map(|(_, payload)| Arc::clone(payload))
    }

    pub fn latest_query(&self) -> Option<Query> {
        self.state.read().latest.as_ref().map(|(query, _)| query.clone())
    }

    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.state.read().errors.clone()
    }

    pub fn error_count(&self) -> usize {
        self.state.read().errors.len()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RepositoryEvent> {
        self.events.subscribe()
    }

    /// Record `query` as the one responses must match to be applied.
    /// Notifications can arrive out of order, so an older generation never
    /// replaces a newer one.
    pub fn mark_current(&self, query: &Query) {
        let mut state = self.state.write();
        if state.wanted.as_ref().is_none_or(|w| w.generation() < query.generation()) {
            state.wanted = Some(query.clone());
        } else {
            debug!(query = %query, "ignoring out-of-order query change");
        }
    }

    /// Fetch the forecast for `query` and apply the result.
    pub async fn fetch(&self, query: Query) -> FetchOutcome {
        debug!(query = %query, days = self.days, "fetching forecast");

        let request = self.source.fetch_forecast(query.value(), self.days);
        let result = match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Network(format!("timed out after {:?}", self.timeout))),
        };

        self.complete(&query, result)
    }

    /// Apply a finished fetch. Failures are always logged; payloads are only
    /// kept when `query` is still the current one.
    pub fn complete(&self, query: &Query, result: Result<LocationData, FetchError>) -> FetchOutcome {
        let (outcome, event) = {
            let mut state = self.state.write();
            match result {
                Err(err) => {
                    warn!(query = %query, error = %err, "forecast fetch failed");
                    let record = ErrorRecord::new(query.clone(), err);
                    state.errors.push(record.clone());
                    (FetchOutcome::Failed, RepositoryEvent::Failed(record))
                }
                Ok(_) if !state.is_current(query) => {
                    info!(query = %query, "discarding response for superseded query");
                    (FetchOutcome::Discarded, RepositoryEvent::Discarded(query.clone()))
                }
                Ok(payload) => {
                    info!(query = %query, location = %payload.location.name, "forecast updated");
                    let payload = Arc::new(payload);
                    state.latest = Some((query.clone(), Arc::clone(&payload)));
                    (FetchOutcome::Applied, RepositoryEvent::Updated { query: query.clone(), payload })
                }
            }
        };

        // Nobody listening is fine.
        let _ = self.events.send(event);
        outcome
    }
}

impl QueryListener for WeatherRepository {
    fn query_changed(self: Arc<Self>, query: &Query) {
        self.mark_current(query);

        let query = query.clone();
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    self.fetch(query).await;
                });
            }
            Err(e) => {
                error!(query = %query, error = %e, "no async runtime, forecast fetch not issued");
                self.complete(&query, Err(FetchError::Network(e.to_string())));
            }
        }
    }
}
