//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::forecast::{extract_daily, timezone_offset};
use crate::history::{SearchHistory, SharedHistory};
use crate::models::{
    DailyForecastResponse, ErrorResponse, HealthResponse, HistoryResponse, StatsResponse,
    WeatherQuery, WeatherResponse,
};
use crate::proxy::FetchProxy;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// Owns the process-wide cache (through the proxy) and the search history.
#[derive(Debug, Clone)]
pub struct AppState {
    pub proxy: FetchProxy,
    pub history: SharedHistory,
}

impl AppState {
    pub fn new(proxy: FetchProxy, history: SearchHistory) -> Self {
        Self {
            proxy,
            history: history.into_shared(),
        }
    }

    /// Builds the cache, upstream client and history described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.cache_ttl)
            .with_max_entries(config.max_entries)
            .into_shared();
        let upstream = UpstreamClient::from_config(config)?;
        Ok(Self::new(FetchProxy::new(cache, upstream), SearchHistory::default()))
    }

    pub fn cache(&self) -> &SharedCache {
        self.proxy.cache()
    }
}

/// Handler for GET /api/weather
///
/// Returns current conditions and the forecast for a place name or a
/// coordinate pair, recording the search on success.
pub async fn weather_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>> {
    let query = weather_query(query)?.validate()?;
    let response = state.proxy.fetch(&query).await?;

    state.history.write().await.record(&query.location);

    Ok(Json(response))
}

/// Handler for GET /api/forecast/daily
///
/// One forecast reading per local day, nearest to noon.
pub async fn daily_forecast_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<DailyForecastResponse>> {
    let query = weather_query(query)?.validate()?;
    let weather = state.proxy.fetch(&query).await?;

    let days = extract_daily(&weather.forecast, timezone_offset(&weather.current));
    Ok(Json(DailyForecastResponse { days }))
}

/// Unwraps the query string, answering malformed ones with the JSON error body.
fn weather_query(
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<WeatherQuery> {
    let Query(query) = query.map_err(|e| ProxyError::InvalidRequest(e.body_text()))?;
    Ok(query)
}

/// Handler for GET /api/history
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let entries = state.history.read().await.entries();
    Json(HistoryResponse { entries })
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache().read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found.")),
    )
}
