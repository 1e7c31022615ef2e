//! Fetch Proxy
//!
//! Turns one client query into the current-conditions and forecast upstream
//! requests, answering each from the cache when possible.

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{cache_key, SharedCache};
use crate::error::Result;
use crate::models::{Location, LocationQuery, WeatherResponse};
use crate::upstream::{Endpoint, UpstreamClient};

// == Fetch Proxy ==
#[derive(Debug, Clone)]
pub struct FetchProxy {
    cache: SharedCache,
    upstream: UpstreamClient,
}

impl FetchProxy {
    pub fn new(cache: SharedCache, upstream: UpstreamClient) -> Self {
        Self { cache, upstream }
    }

    /// The cache shared with the sweep task.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Fetch ==
    /// Resolves both halves of a weather query concurrently.
    ///
    /// Fails as soon as either half fails; no partial result is returned.
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherResponse> {
        let params = upstream_params(query, self.upstream.api_key());

        let (current, forecast) = tokio::join!(
            self.fetch_cached(Endpoint::Current, &params),
            self.fetch_cached(Endpoint::Forecast, &params),
        );

        Ok(WeatherResponse {
            current: current?,
            forecast: forecast?,
        })
    }

    /// Answers one sub-request from the cache, or from upstream on a miss.
    ///
    /// Concurrent misses on the same key may both reach upstream; the last
    /// write wins.
    pub async fn fetch_cached(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<Value> {
        let key = cache_key(endpoint.path(), params);

        // Write lock: lookups update recency and drop expired entries
        if let Some(cached) = self.cache.write().await.get_by_key(&key) {
            debug!("Cache hit for {}", endpoint);
            return Ok(cached);
        }

        debug!("Cache miss for {}, fetching upstream", endpoint);
        let payload = self.upstream.fetch(endpoint, params).await?;
        self.cache.write().await.set_by_key(key, payload.clone());
        info!("Cached fresh {} payload", endpoint);

        Ok(payload)
    }
}

/// Upstream query parameters for a validated query: credential, units and
/// either the place name or the coordinate pair.
pub fn upstream_params(query: &LocationQuery, api_key: &str) -> Vec<(String, String)> {
    let mut params = vec![
        ("appid".to_string(), api_key.to_string()),
        ("units".to_string(), query.units.to_string()),
    ];
    match &query.location {
        Location::Place(q) => params.push(("q".to_string(), q.clone())),
        Location::Coordinates { lat, lon } => {
            params.push(("lat".to_string(), lat.to_string()));
            params.push(("lon".to_string(), lon.to_string()));
        }
    }
    params
}
