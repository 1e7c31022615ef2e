//! API Module
//!
//! HTTP handlers and routing for the weather proxy.
//!
//! # Endpoints
//! - `GET /api/weather` - Current conditions and forecast for a location
//! - `GET /api/forecast/daily` - Daily forecast summary
//! - `GET /api/history` - Recent searches
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
