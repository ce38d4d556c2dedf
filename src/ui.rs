//! Terminal rendering.
//!
//! Draw functions read `DashboardState` and paint it; they hold no state of
//! their own, so whatever the refresh pipeline last applied is what shows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, Row, Table, Tabs,
    },
    Frame,
};

use crate::state::{ActiveTab, DashboardState, DisplayMode};
use crate::view::{layout, BarSpec, ChartSpec, Visibility, FLOW_TABLE_HEADERS, MARKER_COLOR};

const EMPTY_POINTS: [(f64, f64); 0] = [];

/// Top-level draw pass.
pub fn draw(f: &mut Frame, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_tabs(f, chunks[0], state);

    match state.tab {
        ActiveTab::Dashboard => draw_dashboard(f, chunks[1], state),
        ActiveTab::GeoMap => draw_geomap(f, chunks[1], state),
    }

    draw_status_line(f, chunks[2], state);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let selected = match state.tab {
        ActiveTab::Dashboard => 0,
        ActiveTab::GeoMap => 1,
    };

    let tabs = Tabs::new(vec!["Dashboard", "Geo Map"])
        .block(Block::default().borders(Borders::ALL).title(" flowscope "))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, state: &DashboardState) {
    let auto = if state.auto_refresh { "on" } else { "off" };
    let fetched = state
        .last_fetched
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!(" mode: {} ", state.mode.title()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("| auto-refresh: {} ", auto)),
        Span::raw(format!("| events: {} ", state.event_count)),
        Span::raw(format!("| last fetched: {} ", fetched)),
        Span::styled(
            "| 1/2/3 mode  r refresh  a auto  Tab view  space toggle  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Dashboard tab
// ============================================================================

fn draw_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    match state.mode {
        DisplayMode::General => draw_general_primary(f, rows[0], state),
        DisplayMode::ByDirection | DisplayMode::ByInterface => {
            draw_grouped_primary(f, rows[0], state)
        }
    }

    draw_metrics_row(f, rows[1], state);
}

fn draw_general_primary(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    match state.primary.as_slice() {
        [bytes, throughput, ..] => {
            draw_time_chart(f, charts[0], bytes);
            draw_time_chart(f, charts[1], throughput);
        }
        [bytes] => {
            draw_time_chart(f, charts[0], bytes);
            draw_waiting(f, charts[1], "Throughput");
        }
        [] => {
            draw_waiting(f, charts[0], "In Bytes");
            draw_waiting(f, charts[1], "Throughput");
        }
    }

    draw_flow_table(f, rows[1], state);
}

fn draw_grouped_primary(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(78), Constraint::Percentage(22)])
        .split(area);

    match state.primary.first() {
        Some(chart) => draw_time_chart(f, cols[0], chart),
        None => draw_waiting(f, cols[0], state.mode.title()),
    }

    draw_toggle_panel(f, cols[1], state);
}

fn draw_metrics_row(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    match &state.packets {
        Some(chart) => draw_time_chart(f, cols[0], chart),
        None => draw_waiting(f, cols[0], "In Packets"),
    }

    match &state.flow_count {
        Some(chart) => draw_time_chart(f, cols[1], chart),
        None => draw_waiting(f, cols[1], "Flow Count"),
    }

    match &state.top_talkers {
        Some(bars) => draw_bar_chart(f, cols[2], bars),
        None => draw_waiting(f, cols[2], "Top Talkers"),
    }
}

fn draw_flow_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(FLOW_TABLE_HEADERS.to_vec())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .flow_rows
        .iter()
        .map(|r| Row::new(r.cells.to_vec()))
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Flows "));

    f.render_widget(table, area);
}

fn draw_toggle_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .toggles
        .iter()
        .map(|t| {
            let mark = if t.checked { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, t.name))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Series "))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.toggles.cursor()));
    f.render_stateful_widget(list, area, &mut list_state);
}

// ============================================================================
// Geo map tab
// ============================================================================

fn draw_geomap(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    let coords: Vec<(f64, f64)> = state.markers.iter().map(|m| (m.lon, m.lat)).collect();

    let map = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Flow Origins "))
        .marker(symbols::Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Gray,
                resolution: MapResolution::High,
            });
            ctx.draw(&Points {
                coords: &coords,
                color: MARKER_COLOR,
            });
        });

    f.render_widget(map, cols[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(cols[1]);

    draw_geo_info(f, side[0], state);
    draw_marker_list(f, side[1], state);
}

fn draw_geo_info(f: &mut Frame, area: Rect, state: &DashboardState) {
    let fetched = state
        .last_fetched
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let auto = if state.auto_refresh { "on" } else { "off" };

    let text = vec![
        Line::from(format!("Events: {}", state.event_count)),
        Line::from(format!("Markers: {}", state.markers.len())),
        Line::from(format!("Last fetched: {}", fetched)),
        Line::from(format!("Auto-refresh: {}", auto)),
    ];

    let info = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(info, area);
}

fn draw_marker_list(f: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .markers
        .iter()
        .map(|m| ListItem::new(m.label.clone()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Recent Events "));

    f.render_widget(list, area);
}

// ============================================================================
// Chart primitives
// ============================================================================

fn draw_waiting(f: &mut Frame, area: Rect, title: &str) {
    let waiting = Paragraph::new("Waiting for data...")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(Style::default().fg(Color::DarkGray));

    f.render_widget(waiting, area);
}

fn draw_time_chart(f: &mut Frame, area: Rect, spec: &ChartSpec) {
    let has_points = spec.series.iter().any(|s| !s.points.is_empty());
    if !has_points {
        draw_waiting(f, area, &spec.title);
        return;
    }

    let ((min_x, max_x), max_y) = chart_bounds(spec);
    let cfg = layout();

    let datasets: Vec<Dataset> = spec
        .series
        .iter()
        .map(|s| {
            let data: &[(f64, f64)] = match s.visibility {
                Visibility::Visible => &s.points,
                Visibility::LegendOnly => &EMPTY_POINTS,
            };

            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(data)
        })
        .collect();

    let x_labels = vec![
        Span::styled(time_label(min_x, cfg.x_tick_format), cfg.label_style),
        Span::styled(
            time_label((min_x + max_x) / 2.0, cfg.x_tick_format),
            cfg.label_style,
        ),
        Span::styled(time_label(max_x, cfg.x_tick_format), cfg.label_style),
    ];

    let y_labels = vec![
        Span::styled("0", cfg.label_style),
        Span::styled(value_label(max_y / 2.0), cfg.label_style),
        Span::styled(value_label(max_y), cfg.label_style),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", spec.title)),
        )
        .x_axis(
            Axis::default()
                .title(cfg.x_title)
                .style(cfg.axis_style)
                .bounds([min_x, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(cfg.axis_style)
                .bounds([0.0, max_y])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn draw_bar_chart(f: &mut Frame, area: Rect, spec: &BarSpec) {
    if spec.bars.is_empty() {
        draw_waiting(f, area, &spec.title);
        return;
    }

    let data: Vec<(&str, u64)> = spec
        .bars
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();

    let bars = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", spec.title)),
        )
        .data(&data)
        .bar_width(15)
        .bar_gap(1)
        .bar_style(Style::default().fg(spec.color))
        .value_style(Style::default().fg(Color::Black).bg(spec.color));

    f.render_widget(bars, area);
}

/// Plot bounds over the visible series: x spans the data, y spans 0 to a
/// little above the peak.
fn chart_bounds(spec: &ChartSpec) -> ((f64, f64), f64) {
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y: f64 = 0.0;

    for series in &spec.series {
        if series.visibility != Visibility::Visible {
            continue;
        }
        for &(x, y) in &series.points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if min_x > max_x {
        // Every series is toggled off; keep the legend up over an empty plot
        return ((0.0, 1.0), 1.0);
    }

    if min_x == max_x {
        // A single sample still needs a non-degenerate axis
        min_x -= 30_000.0;
        max_x += 30_000.0;
    }

    if max_y <= 0.0 {
        max_y = 1.0;
    } else {
        max_y *= 1.1;
    }

    ((min_x, max_x), max_y)
}

fn time_label(epoch_ms: f64, format: &str) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

fn value_label(value: f64) -> String {
    const K: f64 = 1_000.0;
    const M: f64 = K * 1_000.0;
    const G: f64 = M * 1_000.0;

    if value >= G {
        format!("{:.1}G", value / G)
    } else if value >= M {
        format!("{:.1}M", value / M)
    } else if value >= K {
        format!("{:.1}k", value / K)
    } else {
        format!("{:.0}", value)
    }
}
