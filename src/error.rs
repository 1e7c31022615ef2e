//! Error types for the weather proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Body returned for every failure that is not the client's or upstream's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// == Proxy Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The client query is missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream API answered with a non-success status
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Could not reach the upstream API
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Anything else: unparseable payloads, unexpected states
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Network(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Request URLs carry the `appid` credential, so they are stripped before the
// error can reach a log line.
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Network(err.without_url())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ProxyError::InvalidRequest(msg) => msg,
            ProxyError::Upstream { message, .. } => message,
            other => {
                error!("Request failed: {}", other);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Config Error Enum ==
/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY is not set")]
    MissingApiKey,
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_request_is_400() {
        let response = ProxyError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad");
    }

    #[tokio::test]
    async fn test_upstream_status_is_forwarded() {
        let err = ProxyError::Upstream {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_internal_error_is_masked() {
        let response = ProxyError::Internal("stack trace".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_out_of_range_upstream_status() {
        let err = ProxyError::Upstream {
            status: 42,
            message: String::new(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
