//! Response DTOs for the weather proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::forecast::DailyForecast;
use crate::history::HistoryEntry;

/// Combined payload of `GET /api/weather`; both halves are upstream documents
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResponse {
    pub current: Value,
    pub forecast: Value,
}

/// Response body of `GET /api/forecast/daily`
#[derive(Debug, Clone, Serialize)]
pub struct DailyForecastResponse {
    pub days: Vec<DailyForecast>,
}

/// Response body of `GET /api/history`, most recent search first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// Response body for the stats endpoint (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weather_response_shape() {
        let resp = WeatherResponse {
            current: json!({"name": "London"}),
            forecast: json!({"cnt": 40}),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({"current": {"name": "London"}, "forecast": {"cnt": 40}}));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.set_total_entries(2);

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.hits, 1);
        assert_eq!(resp.total_entries, 2);
        assert!((resp.hit_rate - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_value(ErrorResponse::new("Route not found.")).unwrap();
        assert_eq!(json, json!({"error": "Route not found."}));
    }
}
