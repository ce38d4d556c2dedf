//! Wire types for the collector's JSON responses.
//! Keep this module minimal and stable; it defines the wire format.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One network flow observation, as returned by `/data`.
///
/// The collector serializes missing values as JSON null; absence is valid
/// domain data and must never fail decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRecord {
    pub time_first: String,
    #[serde(default)]
    pub ipv4_src_addr: Option<String>,
    #[serde(default)]
    pub ipv4_dst_addr: Option<String>,
    #[serde(default)]
    pub l4_src_port: Option<u16>,
    #[serde(default)]
    pub l4_dst_port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<u8>,
    #[serde(default)]
    pub tcp_flags: Option<u8>,
    #[serde(default)]
    pub in_bytes: Option<u64>,
    #[serde(default)]
    pub in_pkts: Option<u64>,
    #[serde(default)]
    pub flow_duration_ms: Option<u64>,
    #[serde(default)]
    pub avg_throughput_bps: Option<f64>,
}

/// A flow enriched with geographic coordinates, from `/api/geomap_data`.
///
/// Events missing either coordinate are kept in the payload (they count
/// toward the live total) but are excluded from map rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoEvent {
    pub ip: String,
    pub time: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// One per-minute aggregate from the `/metrics` timeseries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPoint {
    pub minute: String,
    #[serde(default)]
    pub total_bytes: Option<u64>,
    #[serde(default)]
    pub total_packets: Option<u64>,
    #[serde(default)]
    pub flow_count: Option<u64>,
    #[serde(default)]
    pub avg_throughput: Option<f64>,
}

/// A source IP ranked by total byte volume, from `/metrics`.
/// The collector supplies descending order; it is preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTalker {
    pub ipv4_src_addr: String,
    pub total_bytes: u64,
}

/// Combined `/metrics` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub timeseries: Vec<MetricPoint>,
    pub top_talkers: Vec<TopTalker>,
}

/// Per-minute byte count tagged with a traffic direction label,
/// from `/bytes_by_direction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionalBytesPoint {
    pub minute: String,
    pub direction: String,
    #[serde(default)]
    pub total_bytes: Option<u64>,
}

/// Per-minute byte count tagged with the ingress interface id,
/// from `/bytes_by_interface`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceBytesPoint {
    pub minute: String,
    pub ingress_if: u32,
    #[serde(default)]
    pub total_bytes: Option<u64>,
}

/// Parse a collector timestamp into UTC.
///
/// The collector emits three shapes depending on the endpoint: RFC 3339
/// (`/api/geomap_data`), `%Y-%m-%d %H:%M:%S+TZ` strings (`/data`), and naive
/// `%Y-%m-%dT%H:%M:%S` minutes (`/metrics`). Naive values are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        // RFC 3339 with offset (geomap events)
        assert_eq!(parse_timestamp("2024-01-01T12:00:00+04:00"), Some(expected));

        // Space-separated with offset (flow records)
        assert_eq!(parse_timestamp("2024-01-01 12:00:00+04:00"), Some(expected));

        // Naive minute (metrics timeseries), taken as UTC
        let naive = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T12:00:00"), Some(naive));

        assert_eq!(parse_timestamp("not a time"), None);
    }

    #[test]
    fn test_flow_record_missing_fields_decode() {
        let json = r#"{"time_first": "2024-01-01 12:00:00+04:00",
                       "ipv4_src_addr": null, "in_bytes": null}"#;
        let record: FlowRecord = serde_json::from_str(json).unwrap();

        assert!(record.ipv4_src_addr.is_none());
        assert!(record.in_bytes.is_none());
        assert!(record.l4_src_port.is_none());
    }
}
