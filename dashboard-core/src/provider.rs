use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::FetchError, model::LocationData};

pub mod cities;
pub mod weatherapi;

pub use cities::CitiesClient;
pub use weatherapi::WeatherApiClient;

/// Number of forecast days requested per fetch.
pub const FORECAST_DAYS: u8 = 7;

/// Source of forecast payloads for a free-text location query.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, query: &str, days: u8) -> Result<LocationData, FetchError>;
}

/// Source of the full list of known city names.
#[async_trait]
pub trait CitySource: Send + Sync + Debug {
    async fn fetch_cities(&self) -> Result<Vec<String>, FetchError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_bodies_are_cut_at_200_chars() {
        let body = "é".repeat(250);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
