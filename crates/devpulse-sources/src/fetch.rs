//! Shared HTTP plumbing for the source adapters.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::SourceError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "devpulse/0.1 (topic-aggregation)";

/// Per-request settings shared by every source adapter.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn from_app_config(config: &devpulse_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.fetch_timeout_secs,
            user_agent: config.fetch_user_agent.clone(),
        }
    }

    /// Preconfigured `reqwest` builder with the shared timeout and user agent.
    /// Adapters needing extra default headers finish the builder themselves.
    pub(crate) fn client_builder(&self) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(self.user_agent.clone())
    }
}

/// Resolves an adapter's fixed endpoint path against a base URL.
///
/// The base is normalised to end with exactly one slash so that `join`
/// appends the path instead of replacing the last segment.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url, SourceError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    base.join(path).map_err(|e| SourceError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Sends a GET request, asserts a 2xx status, and decodes the body as JSON.
///
/// The body is fetched as text and decoded separately so decode failures
/// carry the request URL as context.
///
/// # Errors
///
/// Returns [`SourceError::Http`] on network failure or a non-2xx status, and
/// [`SourceError::Decode`] if the body is not valid JSON of the expected shape.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, SourceError> {
    let response = client.get(url.clone()).send().await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Decode {
        context: url.to_string(),
        source: e,
    })
}
