//! Chart series builders.
//!
//! Each builder maps one fetched payload into the series specs the UI layer
//! draws. Point order follows the source array; the collector supplies
//! time-ordered data and no client-side re-sort is applied.

use ratatui::style::Color;

use crate::api::{
    parse_timestamp, DirectionalBytesPoint, FlowRecord, InterfaceBytesPoint, MetricPoint,
    TopTalker,
};

use super::layout;

/// Whether a series is plotted or held back as a legend entry only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Hidden from the plot area but retained in the legend.
    LegendOnly,
}

/// One chart series: a named, colored sequence of (epoch millis, value).
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
    pub visibility: Visibility,
}

impl Series {
    pub fn new(name: impl Into<String>, color: Color, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            color,
            points,
            visibility: Visibility::Visible,
        }
    }
}

/// A time chart: a title plus one or more series.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub series: Vec<Series>,
}

/// A bar chart: ordered (label, value) pairs.
#[derive(Debug, Clone)]
pub struct BarSpec {
    pub title: String,
    pub color: Color,
    pub bars: Vec<(String, u64)>,
}

fn ts_ms(raw: &str) -> Option<f64> {
    parse_timestamp(raw).map(|dt| dt.timestamp_millis() as f64)
}

/// In Bytes over time, from the raw flow records.
pub fn bytes_over_time(flows: &[FlowRecord]) -> ChartSpec {
    let points = flows
        .iter()
        .filter_map(|f| ts_ms(&f.time_first).map(|x| (x, f.in_bytes.unwrap_or(0) as f64)))
        .collect();

    ChartSpec {
        title: "In Bytes over Time".to_string(),
        series: vec![Series::new("In Bytes", layout::BYTES_COLOR, points)],
    }
}

/// Average throughput (bps) over time, from the raw flow records.
pub fn throughput_over_time(flows: &[FlowRecord]) -> ChartSpec {
    let points = flows
        .iter()
        .filter_map(|f| ts_ms(&f.time_first).map(|x| (x, f.avg_throughput_bps.unwrap_or(0.0))))
        .collect();

    ChartSpec {
        title: "Throughput (bps) over Time".to_string(),
        series: vec![Series::new(
            "Throughput (bps)",
            layout::THROUGHPUT_COLOR,
            points,
        )],
    }
}

/// In Packets per minute, from the metrics timeseries.
pub fn packets_per_minute(points: &[MetricPoint]) -> ChartSpec {
    let data = points
        .iter()
        .filter_map(|p| ts_ms(&p.minute).map(|x| (x, p.total_packets.unwrap_or(0) as f64)))
        .collect();

    ChartSpec {
        title: "In Packets per Minute".to_string(),
        series: vec![Series::new("In Packets", layout::PACKETS_COLOR, data)],
    }
}

/// Flow count per minute, from the metrics timeseries.
pub fn flow_count_per_minute(points: &[MetricPoint]) -> ChartSpec {
    let data = points
        .iter()
        .filter_map(|p| ts_ms(&p.minute).map(|x| (x, p.flow_count.unwrap_or(0) as f64)))
        .collect();

    ChartSpec {
        title: "Flow Count per Minute".to_string(),
        series: vec![Series::new("Flow Count", layout::FLOW_COUNT_COLOR, data)],
    }
}

/// Top talkers bar chart, in the order the collector ranked them.
pub fn top_talkers(talkers: &[TopTalker]) -> BarSpec {
    BarSpec {
        title: "Top Talkers (bytes)".to_string(),
        color: layout::TALKERS_COLOR,
        bars: talkers
            .iter()
            .map(|t| (t.ipv4_src_addr.clone(), t.total_bytes))
            .collect(),
    }
}

/// Group a flat array of tagged points into one series per distinct tag.
///
/// Tags keep their first-seen order; within a series, points keep the input
/// order. Colors cycle through the group palette in tag order.
pub fn group_tagged(title: &str, points: Vec<(String, f64, f64)>) -> ChartSpec {
    let mut series: Vec<Series> = Vec::new();

    for (tag, x, y) in points {
        match series.iter_mut().find(|s| s.name == tag) {
            Some(s) => s.points.push((x, y)),
            None => {
                let color = layout::GROUP_PALETTE[series.len() % layout::GROUP_PALETTE.len()];
                series.push(Series::new(tag, color, vec![(x, y)]));
            }
        }
    }

    ChartSpec {
        title: title.to_string(),
        series,
    }
}

/// Bytes per minute grouped by traffic direction.
pub fn bytes_by_direction(points: &[DirectionalBytesPoint]) -> ChartSpec {
    let tagged = points
        .iter()
        .filter_map(|p| {
            ts_ms(&p.minute).map(|x| (p.direction.clone(), x, p.total_bytes.unwrap_or(0) as f64))
        })
        .collect();

    group_tagged("Bytes by Direction", tagged)
}

/// Bytes per minute grouped by ingress interface.
pub fn bytes_by_interface(points: &[InterfaceBytesPoint]) -> ChartSpec {
    let tagged = points
        .iter()
        .filter_map(|p| {
            ts_ms(&p.minute).map(|x| {
                (
                    format!("if {}", p.ingress_if),
                    x,
                    p.total_bytes.unwrap_or(0) as f64,
                )
            })
        })
        .collect();

    group_tagged("Bytes by Interface", tagged)
}
