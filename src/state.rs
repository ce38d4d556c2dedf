//! Dashboard view state.
//!
//! A single struct owns everything the UI draws, so mode transitions and
//! visibility changes go through explicit methods instead of ambient
//! variables.

use chrono::{DateTime, Utc};

use crate::view::{BarSpec, ChartSpec, FlowRow, GeoMarker, ToggleSet, Visibility};

/// The three mutually exclusive display modes for the primary chart area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    General,
    ByDirection,
    ByInterface,
}

impl DisplayMode {
    pub fn title(&self) -> &'static str {
        match self {
            DisplayMode::General => "General",
            DisplayMode::ByDirection => "By Direction",
            DisplayMode::ByInterface => "By Interface",
        }
    }
}

/// Which top-level tab is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Dashboard,
    GeoMap,
}

impl ActiveTab {
    pub fn next(self) -> Self {
        match self {
            ActiveTab::Dashboard => ActiveTab::GeoMap,
            ActiveTab::GeoMap => ActiveTab::Dashboard,
        }
    }
}

/// All view state, recomputed from fetched payloads on every refresh cycle.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub mode: DisplayMode,
    pub tab: ActiveTab,
    /// Gates the geo map's timer-triggered reloads only; manual refreshes
    /// and the dashboard surfaces always reload.
    pub auto_refresh: bool,
    /// Primary chart area. General mode holds the bytes and throughput
    /// charts; the grouped modes hold a single multi-series chart.
    pub primary: Vec<ChartSpec>,
    pub toggles: ToggleSet,
    pub flow_rows: Vec<FlowRow>,
    pub packets: Option<ChartSpec>,
    pub flow_count: Option<ChartSpec>,
    pub top_talkers: Option<BarSpec>,
    pub markers: Vec<GeoMarker>,
    /// Count of geo events in the last payload, including ones without
    /// coordinates.
    pub event_count: usize,
    pub last_fetched: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::General,
            tab: ActiveTab::Dashboard,
            auto_refresh: true,
            primary: Vec::new(),
            toggles: ToggleSet::default(),
            flow_rows: Vec::new(),
            packets: None,
            flow_count: None,
            top_talkers: None,
            markers: Vec::new(),
            event_count: 0,
            last_fetched: None,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch display mode, tearing down the previous primary chart and its
    /// toggle set. The caller runs the new mode's fetch + render pipeline.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.primary.clear();
        self.flow_rows.clear();
        self.toggles.clear();
    }

    /// Install a freshly grouped primary chart, rebuilding the toggle set
    /// (all series default to visible).
    pub fn apply_grouped(&mut self, chart: ChartSpec) {
        self.toggles
            .rebuild(chart.series.iter().map(|s| s.name.clone()));
        self.primary = vec![chart];
    }

    /// Set one series' visibility by name, on the toggle set and on every
    /// primary chart holding a series with that name.
    pub fn set_series_visible(&mut self, name: &str, visible: bool) {
        self.toggles.set(name, visible);

        let visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::LegendOnly
        };

        for chart in &mut self.primary {
            if let Some(series) = chart.series.iter_mut().find(|s| s.name == name) {
                series.visibility = visibility;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{group_tagged, Visibility};

    fn grouped_chart() -> ChartSpec {
        group_tagged(
            "Bytes by Direction",
            vec![
                ("ingress".to_string(), 1.0, 10.0),
                ("egress".to_string(), 1.0, 5.0),
            ],
        )
    }

    #[test]
    fn test_initial_mode_is_general() {
        let state = DashboardState::new();
        assert_eq!(state.mode, DisplayMode::General);
        assert!(state.toggles.is_empty());
    }

    #[test]
    fn test_mode_round_trip_discards_toggles() {
        let mut state = DashboardState::new();

        state.set_mode(DisplayMode::ByDirection);
        state.apply_grouped(grouped_chart());
        assert_eq!(state.toggles.len(), 2);

        state.set_mode(DisplayMode::General);

        assert_eq!(state.mode, DisplayMode::General);
        assert!(state.toggles.is_empty());
        assert!(state.primary.is_empty());
    }

    #[test]
    fn test_toggle_off_sets_single_series_legend_only() {
        let mut state = DashboardState::new();
        state.set_mode(DisplayMode::ByDirection);
        state.apply_grouped(grouped_chart());

        state.set_series_visible("egress", false);

        let series = &state.primary[0].series;
        assert_eq!(series[0].visibility, Visibility::Visible);
        assert_eq!(series[1].visibility, Visibility::LegendOnly);
        assert_eq!(state.toggles.is_checked("egress"), Some(false));
        assert_eq!(state.toggles.is_checked("ingress"), Some(true));

        state.set_series_visible("egress", true);
        assert_eq!(state.primary[0].series[1].visibility, Visibility::Visible);
    }

    #[test]
    fn test_refresh_rebuild_resets_toggle_states() {
        let mut state = DashboardState::new();
        state.set_mode(DisplayMode::ByDirection);
        state.apply_grouped(grouped_chart());
        state.set_series_visible("ingress", false);

        // Next cycle's render replaces the toggle set, defaults back to visible
        state.apply_grouped(grouped_chart());
        assert_eq!(state.toggles.is_checked("ingress"), Some(true));
    }
}
