//! Geo marker renderer.
//!
//! The marker layer is fully rebuilt on every cycle, never patched in place.

use crate::api::{parse_timestamp, GeoEvent};

/// One map marker with its popup label.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMarker {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

/// Build markers for every event with both coordinates present.
/// Events missing a coordinate are skipped, silently.
pub fn markers(events: &[GeoEvent]) -> Vec<GeoMarker> {
    events
        .iter()
        .filter_map(|e| match (e.lat, e.lon) {
            (Some(lat), Some(lon)) => Some(GeoMarker {
                lat,
                lon,
                label: popup_label(e),
            }),
            _ => None,
        })
        .collect()
}

/// Popup text: the IP and the full event timestamp.
fn popup_label(event: &GeoEvent) -> String {
    match parse_timestamp(&event.time) {
        Some(dt) => format!("{} | {}", event.ip, dt.format("%d/%m/%Y %H:%M:%S")),
        None => event.ip.clone(),
    }
}
