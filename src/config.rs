//! Configuration Module
//!
//! Loads proxy settings from the environment.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_TTL_SECS;
use crate::error::ConfigError;

/// Default upstream API root
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Proxy configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API credential, sent as `appid`
    pub api_key: String,
    /// Upstream API root, without a trailing slash
    pub base_url: String,
    /// TTL in seconds for cached upstream payloads
    pub cache_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub cleanup_interval: u64,
    /// Optional cache capacity bound
    pub max_entries: Option<usize>,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `OPENWEATHER_API_KEY` - Upstream credential (required)
    /// - `OPENWEATHER_BASE_URL` - Upstream API root (default: OpenWeatherMap 2.5)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 600)
    /// - `CACHE_CHECK_PERIOD` - Sweep interval in seconds (default: 120)
    /// - `CACHE_MAX_ENTRIES` - Capacity bound (default: unbounded)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `PORT` - HTTP server port (default: 5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let defaults = Self::with_api_key(api_key);
        Ok(Self {
            base_url: env::var("OPENWEATHER_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CACHE_CHECK_PERIOD")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.cleanup_interval),
            max_entries: parse_var("CACHE_MAX_ENTRIES").filter(|v| *v > 0),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            api_key: defaults.api_key,
        })
    }

    /// Default settings around the given credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_TTL_SECS,
            cleanup_interval: 120,
            max_entries: None,
            upstream_timeout: 10,
            server_port: 5000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
