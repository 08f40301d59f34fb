use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_core::{
    CitiesClient, CityDirectory, Config, DashboardView, FileStore, QueryStore, RepositoryEvent,
    WeatherApiClient, WeatherRepository,
    projector::{self, SystemClock},
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Everything one dashboard session needs, wired together.
pub struct App {
    pub store: QueryStore,
    pub repo: Arc<WeatherRepository>,
    pub directory: Arc<CityDirectory>,
}

/// What the front end should show after a query change settles.
pub enum Settled {
    Updated(DashboardView),
    Failed { message: String, fallback: Option<DashboardView> },
    Closed,
}

/// City directory backed by the platform cache dir when there is one.
pub fn city_directory(cfg: &Config) -> Result<CityDirectory> {
    let cities = CitiesClient::new(cfg.cities_url.clone(), cfg.request_timeout())
        .context("Failed to build cities client")?;

    let directory = match Config::cache_dir() {
        Ok(dir) => CityDirectory::with_store(Arc::new(cities), Arc::new(FileStore::new(dir))),
        Err(e) => {
            warn!(error = %e, "no cache directory, city list will not persist");
            CityDirectory::new(Arc::new(cities))
        }
    };
    Ok(directory)
}

impl App {
    pub fn from_config(cfg: &Config, initial_query: &str) -> Result<Self> {
        let api_key = cfg.require_api_key()?.to_owned();
        let timeout = cfg.request_timeout();

        let weather = WeatherApiClient::new(api_key, cfg.weather_base_url.clone(), timeout)
            .context("Failed to build WeatherAPI client")?;

        Ok(Self {
            store: QueryStore::new(initial_query)?,
            repo: Arc::new(WeatherRepository::new(Arc::new(weather)).with_timeout(timeout)),
            directory: Arc::new(city_directory(cfg)?),
        })
    }

    /// Hook the repository up to the store, which issues the first fetch.
    pub fn start(&self) -> broadcast::Receiver<RepositoryEvent> {
        let events = self.repo.subscribe();
        self.store.subscribe(self.repo.clone());
        events
    }

    pub fn current_view(&self) -> Option<DashboardView> {
        let today = projector::today_date_string(&SystemClock);
        self.repo.latest().map(|payload| DashboardView::project(&payload, &today))
    }

    /// Wait for the fetch of the current query to finish.
    pub async fn next_settled(&self, events: &mut broadcast::Receiver<RepositoryEvent>) -> Settled {
        loop {
            match events.recv().await {
                Ok(RepositoryEvent::Updated { query, payload }) if query == self.store.current() => {
                    let today = projector::today_date_string(&SystemClock);
                    return Settled::Updated(DashboardView::project(&payload, &today));
                }
                Ok(RepositoryEvent::Failed(record)) if record.query == self.store.current() => {
                    return Settled::Failed {
                        message: record.to_string(),
                        fallback: self.current_view(),
                    };
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "dropped repository events");
                }
                Err(RecvError::Closed) => return Settled::Closed,
            }
        }
    }
}
