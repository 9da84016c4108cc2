use crate::core::config::DEFAULT_BASE_URL;
use crate::core::error::RateError;
use crate::core::rates::{RateSnapshot, RateSource};
use async_trait::async_trait;
use tracing::debug;

/// Environment variable consulted for the provider API key.
pub const API_KEY_ENV_VAR: &str = "EXCHANGE_API_KEY";

// ExchangeRateApiProvider implementation for RateSource
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiProvider {
    /// Creates a provider against `base_url`. A missing `api_key` falls back
    /// to the `EXCHANGE_API_KEY` environment variable. The key is held for
    /// providers that require one; the default latest-rates endpoint is
    /// unauthenticated and the key is not attached to requests.
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.or_else(|| std::env::var(API_KEY_ENV_VAR).ok()),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, RateError> {
        let url = format!("{}/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .build()
            .map_err(|e| RateError::Network {
                base: base.to_string(),
                reason: e.to_string(),
            })?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Network {
                base: base.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RateError::Network {
                base: base.to_string(),
                reason: format!("HTTP error: {}", response.status()),
            });
        }

        let text = response.text().await.map_err(|e| RateError::Network {
            base: base.to_string(),
            reason: e.to_string(),
        })?;

        let snapshot: RateSnapshot =
            serde_json::from_str(&text).map_err(|e| RateError::Parse {
                base: base.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Successfully fetched rates for {}", base);
        Ok(snapshot)
    }
}
