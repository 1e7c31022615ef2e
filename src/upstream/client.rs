//! Upstream weather API client.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ProxyError, Result};

// == Endpoint ==
/// The two upstream resources a weather query is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Current conditions
    Current,
    /// 5-day / 3-hour forecast
    Forecast,
}

impl Endpoint {
    /// Path segment under the API root, also used as the cache key prefix.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// == Upstream Client ==
/// Client for an OpenWeatherMap-compatible API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UpstreamClient {
    /// Creates a client for `base_url` that gives up on requests after `timeout`.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.upstream_timeout),
        )
    }

    /// Credential sent as the `appid` parameter.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    // == Fetch ==
    /// GETs `endpoint` with `params` and returns the JSON body.
    ///
    /// Non-success answers become [`ProxyError::Upstream`] carrying the upstream
    /// status and its `message` field.
    pub async fn fetch(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!("Calling upstream {}", url);

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body)
                .or_else(|| status.canonical_reason().map(String::from))
                .unwrap_or_else(|| "Upstream request failed".to_string());
            warn!("Upstream {} answered {}: {}", endpoint, status, message);
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            ProxyError::Internal(format!(
                "Failed to parse {} response: {}",
                endpoint,
                e.without_url()
            ))
        })
    }
}

/// Extracts the `message` field of an upstream error body.
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
