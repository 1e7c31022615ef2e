//! Weather Proxy - A caching proxy for a third-party weather API
//!
//! Serves current conditions and forecasts, deduplicating upstream calls with a
//! short-lived in-memory cache keyed by normalized request parameters.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod history;
pub mod models;
pub mod proxy;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ConfigError, ProxyError};
pub use tasks::spawn_cleanup_task;
