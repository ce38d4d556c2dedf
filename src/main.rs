//! flowscope - terminal dashboard for network-flow telemetry.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowscope::api::ApiClient;
use flowscope::app::{App, AppEvent};
use flowscope::config::DashConfig;
use flowscope::sched::RefreshTicker;
use flowscope::state::DisplayMode;
use flowscope::ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging to stderr; stdout belongs to the alternate screen
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flowscope=info".parse()?),
        )
        .init();

    // Load configuration
    let cfg = DashConfig::load();
    tracing::info!("Starting flowscope against {}", cfg.base_url);

    let client = Arc::new(ApiClient::new(
        &cfg.base_url,
        Duration::from_secs(cfg.http_timeout_secs),
    )?);

    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
    let mut app = App::new(client, tx.clone());

    // Forward key presses from a blocking reader thread
    let input_tx = tx.clone();
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(Event::Key(key)) => {
                if input_tx.blocking_send(AppEvent::Input(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });

    let ticker = RefreshTicker::start(Duration::from_secs(cfg.refresh_secs), tx);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial load, then redraw on every event
    app.refresh(true);
    terminal.clear()?;
    terminal.draw(|f| ui::draw(f, &app.state))?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Input(key) => {
                if handle_key(&mut app, key) {
                    break;
                }
            }
            other => app.on_event(other),
        }

        terminal.draw(|f| ui::draw(f, &app.state))?;
    }

    // Cleanup
    ticker.stop();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

/// Apply one key press. Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('1') => app.set_mode(DisplayMode::General),
        KeyCode::Char('2') => app.set_mode(DisplayMode::ByDirection),
        KeyCode::Char('3') => app.set_mode(DisplayMode::ByInterface),
        KeyCode::Char('r') => app.refresh(true),
        KeyCode::Char('a') => app.toggle_auto_refresh(),
        KeyCode::Tab => app.state.tab = app.state.tab.next(),
        KeyCode::Up => app.state.toggles.cursor_prev(),
        KeyCode::Down => app.state.toggles.cursor_next(),
        KeyCode::Char(' ') => app.toggle_current_series(),
        _ => {}
    }

    false
}
