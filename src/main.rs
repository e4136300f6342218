use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repochat::app::App;
use repochat::cli::Cli;
use repochat::config::{Config, API_URL_ENV};
use repochat::landing::LandingSubmitter;
use repochat::{handler, tui, ui, RepoChatClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = config.resolve(std::env::var(API_URL_ENV).ok(), cli.overrides())?;

    if let Some(path) = &settings.log_file {
        init_tracing(path)?;
    }
    info!(base_url = %settings.base_url, delay = ?settings.navigation_delay, "starting repochat");

    let backend = Arc::new(RepoChatClient::new(&settings.base_url));
    let mut app = App::new(backend, &settings);
    if let Some(url) = &cli.repo {
        app.landing = LandingSubmitter::new(settings.navigation_delay).with_url(url);
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }

    Ok(())
}

/// Logs go to a file because the terminal owns stderr.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repochat=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
