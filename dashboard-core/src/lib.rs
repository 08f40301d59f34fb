//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The active query store and its change notifications
//! - The forecast repository (last good payload, error log, stale-response guard)
//! - The city directory behind search autocomplete
//! - Pure projections from a payload to dashboard panels
//! - Configuration and the WeatherAPI / cities HTTP clients
//!
//! It is used by `dashboard-cli`, but can also back other front ends.

pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod projector;
pub mod provider;
pub mod query;
pub mod repository;
pub mod storage;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::Config;
pub use directory::CityDirectory;
pub use error::{ErrorRecord, FetchError, QueryError};
pub use model::LocationData;
pub use provider::{CitiesClient, CitySource, ForecastSource, WeatherApiClient};
pub use query::{Query, QueryListener, QueryStore};
pub use repository::{FetchOutcome, RepositoryEvent, WeatherRepository};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::DashboardView;
