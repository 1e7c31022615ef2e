//! Daily Forecast Summary
//!
//! Reduces the 3-hourly upstream forecast to one reading per local day,
//! the one closest to noon.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Timelike};
use serde::Serialize;
use serde_json::Value;

/// Maximum number of days returned
pub const MAX_DAYS: usize = 5;

const TARGET_HOUR: i64 = 12;

/// One day of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    /// Unix timestamp (UTC) of the chosen reading
    pub dt: i64,
    pub temp: f64,
    pub icon: String,
    pub description: String,
}

/// Picks one reading per local calendar day from `forecast.list`.
///
/// `timezone_offset` is the location's UTC offset in seconds. The reading whose
/// local hour is nearest 12:00 wins; the first one seen wins ties. Readings
/// lacking `dt`, `main.temp` or a `weather` element are skipped.
pub fn extract_daily(forecast: &Value, timezone_offset: i64) -> Vec<DailyForecast> {
    let Some(list) = forecast.get("list").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut days: BTreeMap<NaiveDate, (i64, DailyForecast)> = BTreeMap::new();
    for item in list {
        let Some(reading) = parse_reading(item) else {
            continue;
        };
        let Some(local) = DateTime::from_timestamp(reading.dt + timezone_offset, 0) else {
            continue;
        };
        let date = local.date_naive();
        let distance = (i64::from(local.hour()) - TARGET_HOUR).abs();

        let closer = days.get(&date).map_or(true, |(best, _)| distance < *best);
        if closer {
            days.insert(date, (distance, reading));
        }
    }

    days.into_values()
        .take(MAX_DAYS)
        .map(|(_, reading)| reading)
        .collect()
}

/// UTC offset in seconds reported by the current-conditions payload.
pub fn timezone_offset(current: &Value) -> i64 {
    current.get("timezone").and_then(Value::as_i64).unwrap_or(0)
}

fn parse_reading(item: &Value) -> Option<DailyForecast> {
    let weather = item.get("weather")?.get(0)?;
    Some(DailyForecast {
        dt: item.get("dt")?.as_i64()?,
        temp: item.get("main")?.get("temp")?.as_f64()?,
        icon: text(weather, "icon"),
        description: text(weather, "description"),
    })
}

fn text(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
