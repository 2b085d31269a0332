//! Terminal client for a remote tic-tac-toe engine.

#![warn(missing_docs)]

mod app;
mod cli;
mod input;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;
use ttt_client::{ClientConfig, GameClient, HttpGameService};

use app::{App, AppEvent};
use cli::Cli;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }
    if let Some(ms) = cli.poll_interval_ms {
        config = config.with_poll_interval_ms(ms);
    }
    config.validate()?;

    info!(server_url = %config.server_url(), "Starting tic-tac-toe client");

    let client = GameClient::from_config(&config)?;
    client.initialize().await;
    let poller = client.start_polling();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, App::new(client)).await;

    poller.stop();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Application error");
    }
    res
}

/// Logs to a file so output does not interfere with the terminal UI.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ttt_client=debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[instrument(skip_all)]
async fn run_app(terminal: &mut Tui, mut app: App<HttpGameService>) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    while !app.should_quit() {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        let view = app.client().view();
        terminal.draw(|f| ui::draw(f, &app, &view))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::action_for(key.code, app.cursor());
                    app.handle_action(action, &event_tx);
                }
            }
        }
    }

    Ok(())
}
