//! Shared chart layout configuration.
//!
//! Every chart draw call reuses the same axis styling, so the surfaces read
//! as one dashboard.

use ratatui::style::{Color, Style};

/// Series color for the In Bytes chart.
pub const BYTES_COLOR: Color = Color::Blue;
/// Series color for the Throughput chart.
pub const THROUGHPUT_COLOR: Color = Color::Green;
/// Series color for the In Packets chart.
pub const PACKETS_COLOR: Color = Color::Yellow;
/// Series color for the Flow Count chart.
pub const FLOW_COUNT_COLOR: Color = Color::Magenta;
/// Bar color for the Top Talkers chart.
pub const TALKERS_COLOR: Color = Color::Cyan;
/// Marker color on the geo map.
pub const MARKER_COLOR: Color = Color::Red;

/// Color cycle for grouped series (by direction / by interface).
pub const GROUP_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Chart styling shared across all time charts.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub x_title: &'static str,
    pub x_tick_format: &'static str,
    pub axis_style: Style,
    pub label_style: Style,
}

/// The layout configuration reused by every chart render call.
pub fn layout() -> ChartLayout {
    ChartLayout {
        x_title: "Time (HH:MM)",
        x_tick_format: "%H:%M",
        axis_style: Style::default().fg(Color::Gray),
        label_style: Style::default().fg(Color::DarkGray),
    }
}
