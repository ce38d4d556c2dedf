//! Flow table renderer.

use crate::api::{parse_timestamp, FlowRecord};

/// Glyph substituted for any absent field.
pub const PLACEHOLDER: &str = "—";

/// The table shows at most this many of the most recent flows.
pub const FLOW_TABLE_LIMIT: usize = 10;

/// Column headers, in cell order.
pub const FLOW_TABLE_HEADERS: [&str; 10] = [
    "Time", "Src IP", "Dst IP", "Src Port", "Dst Port", "Proto", "Flags", "Bytes", "Pkts",
    "Dur (ms)",
];

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRow {
    pub cells: [String; 10],
}

/// Render the first `min(10, len)` records, in input order.
pub fn flow_rows(flows: &[FlowRecord]) -> Vec<FlowRow> {
    flows.iter().take(FLOW_TABLE_LIMIT).map(row).collect()
}

fn row(f: &FlowRecord) -> FlowRow {
    FlowRow {
        cells: [
            format_flow_time(&f.time_first),
            cell(f.ipv4_src_addr.as_deref()),
            cell(f.ipv4_dst_addr.as_deref()),
            cell(f.l4_src_port),
            cell(f.l4_dst_port),
            cell(f.protocol),
            cell(f.tcp_flags),
            cell(f.in_bytes),
            cell(f.in_pkts),
            cell(f.flow_duration_ms),
        ],
    }
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Display form of a flow timestamp: day, short month, HH:MM (24-hour).
pub fn format_flow_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d %b %H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_flow(time_first: &str) -> FlowRecord {
        FlowRecord {
            time_first: time_first.to_string(),
            ipv4_src_addr: None,
            ipv4_dst_addr: None,
            l4_src_port: None,
            l4_dst_port: None,
            protocol: None,
            tcp_flags: None,
            in_bytes: None,
            in_pkts: None,
            flow_duration_ms: None,
            avg_throughput_bps: None,
        }
    }

    #[test]
    fn test_row_count_capped_at_ten() {
        let flows: Vec<FlowRecord> = (0..25)
            .map(|i| {
                let mut f = empty_flow("2024-01-01T00:00:00");
                f.in_bytes = Some(i);
                f
            })
            .collect();

        let rows = flow_rows(&flows);
        assert_eq!(rows.len(), 10);
        // Input order preserved
        assert_eq!(rows[0].cells[7], "0");
        assert_eq!(rows[9].cells[7], "9");

        assert_eq!(flow_rows(&flows[..3]).len(), 3);
        assert!(flow_rows(&[]).is_empty());
    }

    #[test]
    fn test_absent_fields_render_placeholder() {
        let rows = flow_rows(&[empty_flow("2024-01-01T00:00:00")]);
        let cells = &rows[0].cells;

        for cell in &cells[1..] {
            assert_eq!(cell, PLACEHOLDER);
        }
        // The timestamp itself was present and parseable
        assert_ne!(cells[0], PLACEHOLDER);
    }

    #[test]
    fn test_populated_fields_render_values() {
        let mut f = empty_flow("2024-03-05 18:45:00+00:00");
        f.ipv4_src_addr = Some("192.168.1.10".to_string());
        f.l4_dst_port = Some(443);
        f.protocol = Some(6);

        let rows = flow_rows(&[f]);
        let cells = &rows[0].cells;

        assert_eq!(cells[0], "05 Mar 18:45");
        assert_eq!(cells[1], "192.168.1.10");
        assert_eq!(cells[4], "443");
        assert_eq!(cells[5], "6");
        assert_eq!(cells[2], PLACEHOLDER);
    }

    #[test]
    fn test_unparsable_time_renders_placeholder() {
        let rows = flow_rows(&[empty_flow("not a timestamp")]);
        assert_eq!(rows[0].cells[0], PLACEHOLDER);
    }
}
