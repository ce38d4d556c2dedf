//! Application core: reacts to scheduler ticks and key actions, spawns the
//! active mode's fetches, and applies completed loads to the view state.
//!
//! Fetches are fire-and-forget tasks reporting back over the app's event
//! channel. Each spawned fetch carries a per-surface generation stamp;
//! completions older than the latest issued request for that surface are
//! discarded, so the screen always reflects the last issued request rather
//! than whichever response happened to arrive last.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{
    ApiClient, DirectionalBytesPoint, FetchError, FlowRecord, GeoEvent, InterfaceBytesPoint,
    MetricsResponse,
};
use crate::state::{DashboardState, DisplayMode};
use crate::view;

/// Events consumed by the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the input thread.
    Input(crossterm::event::KeyEvent),
    /// The refresh ticker fired.
    RefreshDue,
    FlowsLoaded {
        generation: u64,
        result: Result<Vec<FlowRecord>, FetchError>,
    },
    MetricsLoaded {
        generation: u64,
        result: Result<MetricsResponse, FetchError>,
    },
    DirectionLoaded {
        generation: u64,
        result: Result<Vec<DirectionalBytesPoint>, FetchError>,
    },
    InterfaceLoaded {
        generation: u64,
        result: Result<Vec<InterfaceBytesPoint>, FetchError>,
    },
    GeoLoaded {
        generation: u64,
        result: Result<Vec<GeoEvent>, FetchError>,
    },
}

/// Latest issued request generation per surface. Direction and interface
/// loads share one counter: they feed the same primary chart.
#[derive(Debug, Default)]
struct Generations {
    flows: u64,
    metrics: u64,
    grouped: u64,
    geo: u64,
}

/// The dashboard application.
pub struct App {
    pub state: DashboardState,
    client: Arc<ApiClient>,
    tx: mpsc::Sender<AppEvent>,
    issued: Generations,
}

impl App {
    pub fn new(client: Arc<ApiClient>, tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            state: DashboardState::new(),
            client,
            tx,
            issued: Generations::default(),
        }
    }

    /// Switch display mode and start that mode's fetch pipeline.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.state.set_mode(mode);
        self.load_primary();
    }

    /// Run one refresh cycle: the active mode's load plus the metrics load.
    /// The geo map reloads on manual refresh always, on timer refresh only
    /// while auto-refresh is enabled.
    pub fn refresh(&mut self, manual: bool) {
        tracing::debug!(manual, mode = self.state.mode.title(), "refresh cycle");

        self.load_primary();
        self.load_metrics();

        if manual || self.state.auto_refresh {
            self.load_geo();
        }
    }

    pub fn toggle_auto_refresh(&mut self) {
        self.state.auto_refresh = !self.state.auto_refresh;
    }

    /// Flip the toggle under the cursor and apply it to the primary chart.
    pub fn toggle_current_series(&mut self) {
        let Some(name) = self.state.toggles.current_name().map(str::to_string) else {
            return;
        };
        let now_visible = !self.state.toggles.is_checked(&name).unwrap_or(true);
        self.state.set_series_visible(&name, now_visible);
    }

    /// Apply one event to the view state. `Input` is the main loop's job and
    /// passes through untouched.
    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(_) => {}
            AppEvent::RefreshDue => self.refresh(false),
            AppEvent::FlowsLoaded { generation, result } => self.on_flows(generation, result),
            AppEvent::MetricsLoaded { generation, result } => self.on_metrics(generation, result),
            AppEvent::DirectionLoaded { generation, result } => {
                self.on_direction(generation, result)
            }
            AppEvent::InterfaceLoaded { generation, result } => {
                self.on_interface(generation, result)
            }
            AppEvent::GeoLoaded { generation, result } => self.on_geo(generation, result),
        }
    }

    fn load_primary(&mut self) {
        match self.state.mode {
            DisplayMode::General => self.load_flows(),
            DisplayMode::ByDirection => self.load_direction(),
            DisplayMode::ByInterface => self.load_interface(),
        }
    }

    fn load_flows(&mut self) {
        self.issued.flows += 1;
        let generation = self.issued.flows;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_flows().await;
            let _ = tx.send(AppEvent::FlowsLoaded { generation, result }).await;
        });
    }

    fn load_metrics(&mut self) {
        self.issued.metrics += 1;
        let generation = self.issued.metrics;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_metrics().await;
            let _ = tx
                .send(AppEvent::MetricsLoaded { generation, result })
                .await;
        });
    }

    fn load_direction(&mut self) {
        self.issued.grouped += 1;
        let generation = self.issued.grouped;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_by_direction().await;
            let _ = tx
                .send(AppEvent::DirectionLoaded { generation, result })
                .await;
        });
    }

    fn load_interface(&mut self) {
        self.issued.grouped += 1;
        let generation = self.issued.grouped;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_by_interface().await;
            let _ = tx
                .send(AppEvent::InterfaceLoaded { generation, result })
                .await;
        });
    }

    fn load_geo(&mut self) {
        self.issued.geo += 1;
        let generation = self.issued.geo;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_geo().await;
            let _ = tx.send(AppEvent::GeoLoaded { generation, result }).await;
        });
    }

    fn on_flows(&mut self, generation: u64, result: Result<Vec<FlowRecord>, FetchError>) {
        if generation != self.issued.flows {
            tracing::debug!(generation, "discarding stale /data response");
            return;
        }
        if self.state.mode != DisplayMode::General {
            return;
        }

        match result {
            Ok(flows) => {
                self.state.primary = vec![
                    view::bytes_over_time(&flows),
                    view::throughput_over_time(&flows),
                ];
                self.state.flow_rows = view::flow_rows(&flows);
            }
            Err(e) => tracing::error!("failed to load /data: {e}"),
        }
    }

    fn on_metrics(&mut self, generation: u64, result: Result<MetricsResponse, FetchError>) {
        if generation != self.issued.metrics {
            tracing::debug!(generation, "discarding stale /metrics response");
            return;
        }

        match result {
            Ok(metrics) => {
                self.state.packets = Some(view::packets_per_minute(&metrics.timeseries));
                self.state.flow_count = Some(view::flow_count_per_minute(&metrics.timeseries));
                self.state.top_talkers = Some(view::top_talkers(&metrics.top_talkers));
            }
            Err(e) => tracing::error!("failed to load /metrics: {e}"),
        }
    }

    fn on_direction(
        &mut self,
        generation: u64,
        result: Result<Vec<DirectionalBytesPoint>, FetchError>,
    ) {
        if generation != self.issued.grouped || self.state.mode != DisplayMode::ByDirection {
            tracing::debug!(generation, "discarding stale /bytes_by_direction response");
            return;
        }

        match result {
            Ok(points) => self.state.apply_grouped(view::bytes_by_direction(&points)),
            Err(e) => tracing::error!("failed to load /bytes_by_direction: {e}"),
        }
    }

    fn on_interface(
        &mut self,
        generation: u64,
        result: Result<Vec<InterfaceBytesPoint>, FetchError>,
    ) {
        if generation != self.issued.grouped || self.state.mode != DisplayMode::ByInterface {
            tracing::debug!(generation, "discarding stale /bytes_by_interface response");
            return;
        }

        match result {
            Ok(points) => self.state.apply_grouped(view::bytes_by_interface(&points)),
            Err(e) => tracing::error!("failed to load /bytes_by_interface: {e}"),
        }
    }

    fn on_geo(&mut self, generation: u64, result: Result<Vec<GeoEvent>, FetchError>) {
        if generation != self.issued.geo {
            tracing::debug!(generation, "discarding stale /api/geomap_data response");
            return;
        }

        match result {
            Ok(events) => {
                self.state.event_count = events.len();
                self.state.markers = view::markers(&events);
                self.state.last_fetched = Some(chrono::Utc::now());
            }
            Err(e) => tracing::error!("failed to load /api/geomap_data: {e}"),
        }
    }
}
