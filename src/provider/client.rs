//! HTTP client for the upstream news API

use super::NewsProvider;
use crate::config::ServiceConfig;
use crate::error::NewsError;
use crate::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Client for a newsdata.io-compatible news search API
#[derive(Debug, Clone)]
pub struct NewsDataClient {
    endpoint: String,
    api_key: String,
    country: String,
    client: reqwest::Client,
}

/// Top-level response envelope from the provider
///
/// Everything beyond `status` and `results` is ignored; the article
/// records themselves stay opaque JSON.
#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Option<Vec<Value>>,
}

impl NewsDataClient {
    /// Create a client from service config
    ///
    /// Fails if no real API key is configured.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(NewsError::Config(format!(
                "No API key configured; set it in the config file or via {}",
                crate::config::API_KEY_ENV
            )));
        }

        Ok(Self::new(&config.endpoint, &config.api_key, &config.country))
    }

    /// Create a client with explicit endpoint, key and country
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            country: country.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsDataClient {
    async fn fetch(&self, language: &str, query: &str) -> Result<Vec<Value>> {
        tracing::debug!(language, query, "Querying news provider");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("language", language),
                ("country", self.country.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(NewsError::Upstream(format!(
                "Provider returned HTTP {}",
                status
            )));
        }

        let body: NewsDataResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Upstream(format!("Unparseable provider response: {}", e)))?;

        if body.status.as_deref() != Some("success") {
            return Err(NewsError::Upstream(format!(
                "Provider status was {:?}, expected \"success\"",
                body.status
            )));
        }

        body.results.ok_or_else(|| {
            NewsError::Upstream("Provider response missing 'results' array".to_string())
        })
    }
}
