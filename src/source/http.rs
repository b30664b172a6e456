//! HTTP city source.

use crate::domain::error::{CitySearchError, Result};
use crate::domain::City;
use crate::source::backend::CityStore;
use crate::source::dto::decode_cities;
use async_trait::async_trait;
use tracing::Instrument;

/// Fetches the city feed with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpCityStore {
    client: reqwest::Client,
    url: String,
}

impl HttpCityStore {
    /// Creates a source for the feed at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a source that reuses an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CityStore for HttpCityStore {
    async fn fetch_all_cities(&self) -> Result<Vec<City>> {
        let span = tracing::debug_span!("http_fetch_cities", url = %self.url);

        async move {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| CitySearchError::Load(format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                tracing::debug!(%status, "city feed returned error status");
                return Err(CitySearchError::Load(format!("unexpected status {status}")));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| CitySearchError::Load(format!("failed to read body: {e}")))?;

            let cities = decode_cities(&body)?;
            tracing::debug!(count = cities.len(), bytes = body.len(), "city feed decoded");
            Ok(cities)
        }
        .instrument(span)
        .await
    }
}
