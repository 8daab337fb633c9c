use anyhow::Context;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

mod actions;
mod dispatcher;
mod logger;
mod middleware;
mod reducer;
mod reducers;
mod state;
mod store;
mod theme;
mod view_models;
mod views;

use actions::{GlobalAction, ModelAction};
use middleware::{CompileMiddleware, EditorMiddleware, KeyboardMiddleware, LoggingMiddleware};
use spm_client::HttpCompileService;
use spm_config::AppConfig;
use state::AppState;
use store::Store;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(80);

fn main() -> anyhow::Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting spm-studio, logging to {:?}", log_file);

    let config = AppConfig::load();
    let service = HttpCompileService::new(&config.backend_url, config.request_timeout())
        .context("Failed to create compile service client")?;
    log::info!("Compile service: {}", service.base_url());

    // Initialize store with middleware
    let mut store = Store::new(AppState::new(&config));

    // Add middleware in order (they execute in this order)
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(KeyboardMiddleware::new()));
    store.add_middleware(Box::new(EditorMiddleware::new()));
    store.add_middleware(Box::new(CompileMiddleware::new(
        Arc::new(service),
        spm_solver::default_compiler(),
    )?));

    // Load the variable names the service accepts once the loop starts
    store.dispatcher().dispatch(ModelAction::FetchSpmOptions);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        log::error!("Exiting with error: {:#}", err);
    }
    log::info!("Exiting spm-studio");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
) -> anyhow::Result<()> {
    loop {
        // Render
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(store.state(), area, frame);
        })?;

        // Check if we should quit
        if !store.state().running {
            break;
        }

        // Handle events
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    store.dispatch(GlobalAction::KeyPressed(key))?;
                }
            }
        }

        store.dispatch(GlobalAction::Tick)?;

        // Results of async work
        store.process_pending()?;
    }

    Ok(())
}
