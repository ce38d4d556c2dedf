//! Collector API client.
//!
//! Each fetcher issues a single GET against a fixed endpoint path and
//! decodes the JSON body. No retry, no backoff: a failed cycle is logged by
//! the caller and the previous view stays on screen.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{
    DirectionalBytesPoint, FlowRecord, GeoEvent, InterfaceBytesPoint, MetricsResponse,
};

/// Fetch error types.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// HTTP client bound to one collector base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the recent flow records from `/data`.
    pub async fn fetch_flows(&self) -> Result<Vec<FlowRecord>, FetchError> {
        self.get_json("/data").await
    }

    /// Fetch geolocated flow events from `/api/geomap_data`.
    pub async fn fetch_geo(&self) -> Result<Vec<GeoEvent>, FetchError> {
        self.get_json("/api/geomap_data").await
    }

    /// Fetch the per-minute aggregates and top talkers from `/metrics`.
    pub async fn fetch_metrics(&self) -> Result<MetricsResponse, FetchError> {
        self.get_json("/metrics").await
    }

    /// Fetch per-direction byte series from `/bytes_by_direction`.
    pub async fn fetch_by_direction(&self) -> Result<Vec<DirectionalBytesPoint>, FetchError> {
        self.get_json("/bytes_by_direction").await
    }

    /// Fetch per-interface byte series from `/bytes_by_interface`.
    pub async fn fetch_by_interface(&self) -> Result<Vec<InterfaceBytesPoint>, FetchError> {
        self.get_json("/bytes_by_interface").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // A non-2xx JSON error body must not render as data
        let response = response
            .error_for_status()
            .map_err(|e| FetchError::Status(e.status().map(|s| s.as_u16()).unwrap_or(0)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_unreachable_server() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let result = client.fetch_flows().await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://example.test");
    }
}
