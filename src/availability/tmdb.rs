use super::lookup::WatchProviderSource;
use super::types::TmdbId;
use super::{HttpClient, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const FALLBACK_TITLE: &str = "Unknown Movie";

/// Response for `/movie/{id}/watch/providers`
#[derive(Debug, Deserialize)]
struct WatchProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionOffers>,
}

/// Offers for one region, keyed by access model
#[derive(Debug, Deserialize)]
struct RegionOffers {
    /// Subscription (non-rental) offers
    #[serde(default)]
    flatrate: Vec<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    provider_name: String,
}

/// Response for `/movie/{id}`, reduced to what we consume
#[derive(Debug, Deserialize)]
struct MovieDetails {
    title: Option<String>,
}

/// Client for The Movie Database API
pub struct TmdbClient {
    client: HttpClient,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(base_url, timeout),
            api_key: api_key.into(),
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        params.extend_from_slice(extra_params);

        self.client.get_with_params(endpoint, &params).await
    }

    /// Fetch the movie title for a TMDB ID, falling back to a placeholder
    /// when the response carries none.
    pub async fn movie_title(&self, id: &TmdbId) -> Result<String> {
        let endpoint = format!("/movie/{id}");
        let details: MovieDetails = self.request(&endpoint, &[]).await?;

        Ok(details.title.unwrap_or_else(|| FALLBACK_TITLE.to_string()))
    }
}

#[async_trait]
impl WatchProviderSource for TmdbClient {
    /// Fetch provider names offering the title under a subscription model in
    /// the given region, in upstream order. A region absent from the
    /// response yields an empty list.
    async fn flatrate_providers(&self, id: &TmdbId, region: &str) -> Result<Vec<String>> {
        let endpoint = format!("/movie/{id}/watch/providers");
        let response: WatchProvidersResponse = self.request(&endpoint, &[]).await?;

        Ok(response
            .results
            .get(region)
            .map(|offers| {
                offers
                    .flatrate
                    .iter()
                    .map(|entry| entry.provider_name.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}
