//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    daily_forecast_handler, health_handler, history_handler, not_found_handler, stats_handler,
    weather_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/weather` - Current conditions and forecast
/// - `GET /api/forecast/daily` - One forecast reading per day
/// - `GET /api/history` - Recent searches
/// - `GET /api/cache/stats` - Cache statistics
/// - `GET /health` - Health check
///
/// Anything else answers 404 with a JSON error body.
pub fn create_router(state: AppState) -> Router {
    // The dashboard is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/weather", get(weather_handler))
        .route("/api/forecast/daily", get(daily_forecast_handler))
        .route("/api/history", get(history_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            upstream_timeout: 1,
            ..Config::with_api_key("test-key")
        };
        create_router(AppState::from_config(&config).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_json(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_weather_endpoint_requires_location() {
        let (status, body) = get_json(create_test_app(), "/api/weather?units=metric").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Please provide either city name (q) or lat & lon."})
        );
    }

    #[tokio::test]
    async fn test_malformed_query_string_is_json_400() {
        let (status, body) = get_json(create_test_app(), "/api/weather?q=a&q=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));

        let (status, body) = get_json(create_test_app(), "/api/forecast/daily?q=a&q=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_location_wins_over_bad_units() {
        let (status, body) = get_json(create_test_app(), "/api/weather?units=kelvin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Please provide either city name (q) or lat & lon."})
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_json(create_test_app(), "/api/nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Route not found."}));
    }

    #[tokio::test]
    async fn test_history_starts_empty() {
        let (status, body) = get_json(create_test_app(), "/api/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"entries": []}));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_500() {
        let (status, body) = get_json(create_test_app(), "/api/weather?q=London").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
