//! City-name directory backing the search autocomplete.

use std::{collections::HashSet, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{provider::CitySource, storage::KeyValueStore};

pub const CITY_CACHE_KEY: &str = "city_suggestions";

/// Loads the list of known cities once and keeps it for the process lifetime.
///
/// A configured [`KeyValueStore`] is consulted before the network and written
/// after every successful fetch.
#[derive(Debug)]
pub struct CityDirectory {
    source: Arc<dyn CitySource>,
    store: Option<Arc<dyn KeyValueStore>>,
    // Held across the fetch so concurrent first callers share one request.
    cities: Mutex<Option<Arc<Vec<String>>>>,
}

impl CityDirectory {
    pub fn new(source: Arc<dyn CitySource>) -> Self {
        Self { source, store: None, cities: Mutex::new(None) }
    }

    pub fn with_store(source: Arc<dyn CitySource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { source, store: Some(store), cities: Mutex::new(None) }
    }

    /// All known city names. Never fails: a broken source yields an empty list,
    /// which is kept until [`CityDirectory::reload`] is called.
    pub async fn load(&self) -> Arc<Vec<String>> {
        let mut cities = self.cities.lock().await;
        if let Some(loaded) = cities.as_ref() {
            return Arc::clone(loaded);
        }

        let loaded = match self.read_store() {
            Some(stored) => {
                let stored = dedup(stored);
                info!(count = stored.len(), "city list loaded from local cache");
                stored
            }
            None => self.fetch_and_persist().await,
        };

        let loaded = Arc::new(loaded);
        *cities = Some(Arc::clone(&loaded));
        loaded
    }

    /// Drop the in-memory list and fetch it again, skipping the local cache.
    pub async fn reload(&self) -> Arc<Vec<String>> {
        let mut cities = self.cities.lock().await;

        let loaded = Arc::new(self.fetch_and_persist().await);
        *cities = Some(Arc::clone(&loaded));
        loaded
    }

    fn read_store(&self) -> Option<Vec<String>> {
        let store = self.store.as_ref()?;

        let raw = match store.get(CITY_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read cached city list");
                return None;
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(cities) if cities.is_empty() => {
                debug!("cached city list is empty, refetching");
                None
            }
            Ok(cities) => Some(cities),
            Err(e) => {
                warn!(error = %e, "ignoring corrupt cached city list");
                None
            }
        }
    }

    async fn fetch_and_persist(&self) -> Vec<String> {
        let cities = match self.source.fetch_cities().await {
            Ok(cities) => dedup(cities),
            Err(e) => {
                warn!(error = %e, "city list unavailable, suggestions disabled");
                return Vec::new();
            }
        };
        info!(count = cities.len(), "city list fetched");

        if cities.is_empty() {
            return cities;
        }

        if let Some(store) = &self.store {
            let persisted = serde_json::to_string(&cities)
                .map_err(anyhow::Error::from)
                .and_then(|json| store.set(CITY_CACHE_KEY, &json));
            if let Err(e) = persisted {
                warn!(error = %e, "could not persist city list");
            }
        }

        cities
    }
}

/// Case-insensitive substring match, in the order of `all`. An empty needle
/// matches nothing.
pub fn filter(all: &[String], needle: &str) -> Vec<String> {
    filter_limited(all, needle, usize::MAX)
}

pub fn filter_limited(all: &[String], needle: &str, limit: usize) -> Vec<String> {
    if needle.is_empty() {
        return Vec::new();
    }

    let needle = needle.to_lowercase();
    let matches: Vec<String> = all
        .iter()
        .filter(|city| city.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect();

    debug!(needle = %needle, matches = matches.len(), "filtered city suggestions");
    matches
}

fn dedup(cities: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(cities.len());
    cities
        .into_iter()
        .filter(|city| !city.trim().is_empty())
        .filter(|city| seen.insert(city.clone()))
        .collect()
}
