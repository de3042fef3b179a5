use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientSettings,
    location::LocationQuery,
    model::{AstronomyPayload, CurrentPayload, UpstreamError, UpstreamResult},
};

use super::WeatherProvider;

/// Client for the weatherapi.com `current.json` and `astronomy.json` endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self {
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> UpstreamResult<T> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        let url = format!("{}/{endpoint}", self.base_url);

        tracing::debug!(%url, query = %query, "requesting WeatherAPI");

        let res = self
            .http
            .get(&url)
            // `query` percent-encodes both values.
            .query(&[("key", api_key), ("q", query.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = res.status();
        if status == StatusCode::FORBIDDEN {
            tracing::warn!(endpoint, "WeatherAPI rejected the API key");
            return Err(UpstreamError::InvalidCredentials);
        }
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "WeatherAPI request failed");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = res.text().await.map_err(|e| transport_error(endpoint, e))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(endpoint, error = %e, body = %truncate_body(&body), "unparseable WeatherAPI body");
            UpstreamError::InvalidResponse
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch_current(&self, query: &LocationQuery) -> UpstreamResult<CurrentPayload> {
        self.fetch("current.json", query).await
    }

    async fn fetch_astronomy(&self, query: &LocationQuery) -> UpstreamResult<AstronomyPayload> {
        self.fetch("astronomy.json", query).await
    }
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> UpstreamError {
    if err.is_connect() || err.is_timeout() {
        tracing::warn!(endpoint, error = %err, "could not reach WeatherAPI");
        UpstreamError::Network
    } else {
        tracing::warn!(endpoint, error = %err, "unexpected WeatherAPI failure");
        // Drop the URL: it carries the API key.
        UpstreamError::Unexpected(err.without_url().to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
