use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

use super::{CitySource, truncate_body};

pub const DEFAULT_CITIES_URL: &str =
    "https://countriesnow.space/api/v0.1/countries/population/cities";

#[derive(Debug, Clone)]
pub struct CitiesClient {
    url: String,
    http: Client,
}

impl CitiesClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { url: url.into(), http })
    }
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    city: String,
}

#[derive(Debug, Deserialize)]
struct CitiesResponse {
    data: Vec<CityRecord>,
}

#[async_trait]
impl CitySource for CitiesClient {
    async fn fetch_cities(&self) -> Result<Vec<String>, FetchError> {
        debug!(url = %self.url, "requesting city list");

        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::BadResponse {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: CitiesResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

        Ok(parsed.data.into_iter().map(|record| record.city).collect())
    }
}
