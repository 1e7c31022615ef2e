//! Request DTOs for the weather proxy API
//!
//! Defines the query string accepted by the weather endpoints and its validation.

use std::fmt;

use serde::Deserialize;

use crate::error::ProxyError;

/// Returned when neither a place name nor a full coordinate pair is given.
pub const MISSING_LOCATION_MESSAGE: &str = "Please provide either city name (q) or lat & lon.";
pub const INVALID_COORDINATES_MESSAGE: &str = "lat and lon must be valid numbers.";
pub const INVALID_UNITS_MESSAGE: &str = "units must be either metric or imperial.";

/// Raw query string of `GET /api/weather` and `GET /api/forecast/daily`.
///
/// Every field is optional here; [`WeatherQuery::validate`] decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    /// City name, e.g. "London"
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    /// "metric" or "imperial"
    pub units: Option<String>,
}

// == Units ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Location ==
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Place(String),
    Coordinates { lat: f64, lon: f64 },
}

/// A query that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub location: Location,
    pub units: Units,
}

impl WeatherQuery {
    /// Validates the raw query.
    ///
    /// A non-empty `q` wins over coordinates when both are present. A missing
    /// location is reported even when `units` is also invalid.
    pub fn validate(&self) -> Result<LocationQuery, ProxyError> {
        let location = if let Some(q) = non_empty(&self.q) {
            Location::Place(q.to_string())
        } else if let (Some(lat), Some(lon)) = (non_empty(&self.lat), non_empty(&self.lon)) {
            match (parse_coordinate(lat), parse_coordinate(lon)) {
                (Some(lat), Some(lon)) => Location::Coordinates { lat, lon },
                _ => {
                    return Err(ProxyError::InvalidRequest(
                        INVALID_COORDINATES_MESSAGE.to_string(),
                    ))
                }
            }
        } else {
            return Err(ProxyError::InvalidRequest(MISSING_LOCATION_MESSAGE.to_string()));
        };

        // Location problems are reported before unit problems
        let units = match non_empty(&self.units) {
            None | Some("metric") => Units::Metric,
            Some("imperial") => Units::Imperial,
            Some(_) => return Err(ProxyError::InvalidRequest(INVALID_UNITS_MESSAGE.to_string())),
        };

        Ok(LocationQuery { location, units })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
