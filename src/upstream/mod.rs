//! Upstream Module
//!
//! HTTP client for the third-party weather API.

mod client;

pub use client::{Endpoint, UpstreamClient};
