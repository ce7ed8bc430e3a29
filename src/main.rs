//! Field Builder - Terminal UI for defining choice fields
//!
//! A Ratatui-based form for building single and multi-select field
//! definitions, validating them locally and saving them to a field service.

mod app;
mod config;
mod engine;
mod platform;
mod state;
mod submit;
mod transport;
mod ui;

use anyhow::Result;
use app::App;
use config::BuilderConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{DraftStore, FileStorage, MemoryStorage, SnapshotStorage};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use submit::Submitter;
use transport::HttpTransport;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to a file so they don't draw over the alternate screen
fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "field_builder=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match BuilderConfig::log_path() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            registry
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .init();
        }
        None => registry.with(fmt::layer().with_writer(io::sink)).init(),
    }
    Ok(())
}

fn open_storage() -> Box<dyn SnapshotStorage> {
    match FileStorage::default_location() {
        Some(storage) => Box::new(storage),
        None => {
            tracing::warn!("No data directory available, drafts will not survive a restart");
            Box::new(MemoryStorage::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = BuilderConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        BuilderConfig::default()
    });
    tracing::info!("Field service at {}", config.server_url());

    let store = DraftStore::load(open_storage());
    let transport = Arc::new(HttpTransport::new(config.server_url()));
    let submitter = Submitter::new(transport).with_delay(config.submit_delay());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(store, submitter);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while a submit is in flight so the spinner animates
        let poll_duration = if app.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // event::poll blocks the worker thread
        let ready = tokio::task::block_in_place(|| event::poll(poll_duration))?;
        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.quit();
                    } else {
                        app.handle_key(key);
                    }
                }
                Event::Resize(_width, _height) => {
                    // Layout is recomputed on next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
