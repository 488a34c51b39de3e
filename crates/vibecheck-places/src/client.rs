//! HTTP client for the Foursquare Places `search` endpoint.
//!
//! Wraps `reqwest` with the API's version header, bearer credential, an
//! optional relay prefix, and typed error mapping. Non-2xx responses become
//! [`PlacesError::Service`]; anything that prevents a usable response
//! becomes [`PlacesError::Connection`] or [`PlacesError::Malformed`].

use std::time::Duration;

use reqwest::{Client, Url};
use vibecheck_core::{AppConfig, Coordinates, Place};

use crate::error::PlacesError;
use crate::normalize::normalize_results;
use crate::types::{PlaceSearchResponse, ServiceErrorBody};

pub const DEFAULT_BASE_URL: &str = "https://places-api.foursquare.com";
pub const DEFAULT_API_VERSION: &str = "2025-06-17";

const SEARCH_PATH: &str = "places/search";
const API_VERSION_HEADER: &str = "X-Places-Api-Version";

/// Search radius and result cap sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub radius_m: u32,
    pub limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            radius_m: 3000,
            limit: 10,
        }
    }
}

/// Client for the places search API.
///
/// Use [`PlacesClient::new`] for production, [`PlacesClient::from_config`]
/// to apply the environment configuration, or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    api_version: String,
    base_url: Url,
    proxy_url: Option<String>,
    params: SearchParams,
}

impl PlacesClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Connection`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// No request timeout is applied unless `timeout_secs` is given.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Connection`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            base_url,
            proxy_url: None,
            params: SearchParams::default(),
        })
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::with_base_url`] and [`PlacesClient::with_proxy`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let client = Self::with_base_url(
            &config.places_api_key,
            &config.user_agent,
            config.request_timeout_secs,
            &config.places_base_url,
        )?
        .with_api_version(&config.places_api_version)
        .with_search_params(SearchParams {
            radius_m: config.search_radius_m,
            limit: config.search_limit,
        });

        match config.proxy_url.as_deref() {
            Some(proxy) => client.with_proxy(proxy),
            None => Ok(client),
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        api_version.clone_into(&mut self.api_version);
        self
    }

    #[must_use]
    pub fn with_search_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Routes requests through a relay that expects the full target URL
    /// appended to its own, e.g. `https://relay.example/fetch/`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidUrl`] if `proxy_url` is not a valid URL.
    pub fn with_proxy(mut self, proxy_url: &str) -> Result<Self, PlacesError> {
        Url::parse(proxy_url).map_err(|e| PlacesError::InvalidUrl {
            url: proxy_url.to_owned(),
            reason: e.to_string(),
        })?;
        self.proxy_url = Some(proxy_url.to_owned());
        Ok(self)
    }

    /// Searches for places around `coords` and returns the normalized records.
    ///
    /// Returns an empty list (not an error) when the API reports no results
    /// or every record is filtered out.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Service`] on a non-2xx status.
    /// - [`PlacesError::Connection`] on network failure.
    /// - [`PlacesError::Malformed`] if a 2xx body is not the expected JSON.
    pub async fn fetch_nearby_places(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.request_url(coords)?;
        tracing::debug!(
            %url,
            radius_m = self.params.radius_m,
            limit = self.params.limit,
            "searching nearby places"
        );

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(API_VERSION_HEADER, &self.api_version)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // A missing or non-JSON error body yields an empty message.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %message, "places search failed");
            return Err(PlacesError::Service {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: PlaceSearchResponse =
            serde_json::from_str(&body).map_err(PlacesError::Malformed)?;
        let raw_count = parsed.results.as_ref().map_or(0, Vec::len);
        let places = normalize_results(parsed);

        tracing::info!(
            raw_count,
            kept = places.len(),
            "fetched nearby places"
        );
        Ok(places)
    }

    /// Builds the search URL, prefixed with the relay when one is configured.
    fn request_url(&self, coords: Coordinates) -> Result<Url, PlacesError> {
        let target = self.search_url(coords)?;
        let Some(proxy) = &self.proxy_url else {
            return Ok(target);
        };
        let relayed = format!("{proxy}{target}");
        Url::parse(&relayed).map_err(|e| PlacesError::InvalidUrl {
            url: relayed.clone(),
            reason: e.to_string(),
        })
    }

    /// Builds the direct search URL with percent-encoded query parameters.
    fn search_url(&self, coords: Coordinates) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| PlacesError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("ll", &coords.to_ll())
            .append_pair("radius", &self.params.radius_m.to_string())
            .append_pair("limit", &self.params.limit.to_string());
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
