//! HTTP client for the Geo API.
//!
//! Wraps `reqwest` with Geo API URL construction, transient-error retry and
//! typed response decoding. An unknown postal code is not an error at this
//! layer: it comes back as an empty [`LookupResult`] and the resolver decides
//! what that means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use yubin_core::config::DEFAULT_GEOAPI_BASE_URL;
use yubin_core::{AppConfig, LocationCandidate, LookupResult, PostalCode};

use crate::error::GeoApiError;
use crate::retry::retry_with_backoff;
use crate::types::GeoApiResponse;

const USER_AGENT: &str = "yubin/0.1 (postal-lookup)";

/// Source of [`LookupResult`]s for a postal code.
///
/// The server holds this as `Arc<dyn GeoLookup>` so handlers can be exercised
/// against a stub.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Looks up every locality registered for `postal_code`.
    async fn search_by_postal(&self, postal_code: &PostalCode)
        -> Result<LookupResult, GeoApiError>;
}

#[derive(Debug, Clone)]
pub struct GeoApiClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Additional attempts after the first on transient failures.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for GeoApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOAPI_BASE_URL.to_string(),
            timeout_secs: 10,
            max_retries: 2,
            backoff_base_ms: 250,
        }
    }
}

impl GeoApiClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.geoapi_base_url.clone(),
            timeout_secs: config.geoapi_timeout_secs,
            max_retries: config.geoapi_max_retries,
            ..Self::default()
        }
    }
}

/// Client for the Geo API `searchByPostal` method.
#[derive(Debug, Clone)]
pub struct GeoApiClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeoApiClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeoApiError::InvalidBaseUrl`] if
    /// `config.base_url` does not parse.
    pub fn new(config: GeoApiClientConfig) -> Result<Self, GeoApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .build()?;

        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| GeoApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Builds `{base}?method=searchByPostal&postal={code}`.
    fn build_url(&self, postal_code: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("method", "searchByPostal")
            .append_pair("postal", postal_code);
        url
    }

    /// Sends one GET request and decodes the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GeoApiError::Http`] on network failure,
    /// [`GeoApiError::UnexpectedStatus`] on a non-2xx status, or
    /// [`GeoApiError::Deserialize`] if the body is not the expected JSON.
    async fn request_once(&self, url: &Url) -> Result<GeoApiResponse, GeoApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeoApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl GeoLookup for GeoApiClient {
    async fn search_by_postal(
        &self,
        postal_code: &PostalCode,
    ) -> Result<LookupResult, GeoApiError> {
        let url = self.build_url(postal_code.as_str());
        let envelope = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_once(&url)
        })
        .await?;

        if let Some(message) = envelope.response.error.as_deref() {
            tracing::debug!(postal_code = %postal_code, message, "Geo API reported no match");
        }

        let candidates: Vec<LocationCandidate> = envelope
            .response
            .location
            .into_iter()
            .map(LocationCandidate::from)
            .collect();

        tracing::debug!(
            postal_code = %postal_code,
            hit_count = candidates.len(),
            "Geo API lookup complete"
        );

        Ok(LookupResult::new(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeoApiClient {
        GeoApiClient::new(GeoApiClientConfig {
            base_url: base_url.to_string(),
            ..GeoApiClientConfig::default()
        })
        .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_search_by_postal_query() {
        let client = test_client("https://geoapi.heartrails.com/api/json");
        let url = client.build_url("1000005");
        assert_eq!(
            url.as_str(),
            "https://geoapi.heartrails.com/api/json?method=searchByPostal&postal=1000005"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://geoapi.heartrails.com/api/json/");
        let url = client.build_url("1020082");
        assert_eq!(
            url.as_str(),
            "https://geoapi.heartrails.com/api/json?method=searchByPostal&postal=1020082"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GeoApiClient::new(GeoApiClientConfig {
            base_url: "not a url".to_string(),
            ..GeoApiClientConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, GeoApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn default_config_points_at_heartrails() {
        let config = GeoApiClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_GEOAPI_BASE_URL);
        assert_eq!(config.max_retries, 2);
    }
}
