//! HTTP client for the flow collector API.
//!
//! One fetcher per endpoint: flows, metrics, geolocated events, and the
//! per-direction / per-interface byte series.

mod client;
mod models;

pub use client::*;
pub use models::*;
