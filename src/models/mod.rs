//! Request and Response models for the weather proxy API
//!
//! DTOs used for the query strings and JSON bodies of the HTTP surface.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Location, LocationQuery, Units, WeatherQuery, MISSING_LOCATION_MESSAGE};
pub use responses::{
    DailyForecastResponse, ErrorResponse, HealthResponse, HistoryResponse, StatsResponse,
    WeatherResponse,
};
