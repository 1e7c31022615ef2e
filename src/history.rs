//! Search History
//!
//! Remembers the most recent successful weather searches, one entry per
//! distinct location.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::Location;

/// Number of searches kept
pub const HISTORY_LIMIT: usize = 5;

/// Label used for coordinate searches
pub const COORDINATES_LABEL: &str = "My Location";

pub type SharedHistory = Arc<RwLock<SearchHistory>>;

// == History Entry ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Dedup key: lowercased place name, or `lat,lon` rounded to two decimals
    pub key: String,
    /// Display label
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub searched_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(location: &Location, searched_at: DateTime<Utc>) -> Self {
        match location {
            Location::Place(q) => Self {
                key: q.trim().to_lowercase(),
                label: capitalize(q.trim()),
                q: Some(q.clone()),
                lat: None,
                lon: None,
                searched_at,
            },
            Location::Coordinates { lat, lon } => Self {
                key: format!("{:.2},{:.2}", lat, lon),
                label: COORDINATES_LABEL.to_string(),
                q: None,
                lat: Some(*lat),
                lon: Some(*lon),
                searched_at,
            },
        }
    }
}

// == Search History ==
#[derive(Debug)]
pub struct SearchHistory {
    /// Most recent first
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl SearchHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn into_shared(self) -> SharedHistory {
        Arc::new(RwLock::new(self))
    }

    // == Record ==
    /// Puts a search at the front, replacing an earlier search for the same
    /// location and dropping the oldest entry past the limit.
    pub fn record(&mut self, location: &Location) {
        self.record_at(location, Utc::now());
    }

    pub fn record_at(&mut self, location: &Location, searched_at: DateTime<Utc>) {
        let entry = HistoryEntry::new(location, searched_at);
        self.entries.retain(|e| e.key != entry.key);
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
