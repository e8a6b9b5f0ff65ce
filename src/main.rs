mod api;
mod app;
mod config;
mod dialog;
mod logging;
mod ui;

use crate::api::{ApiClient, ApiManager, RefreshTarget};
use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(version, about = "Terminal client for the package marketplace")]
struct Cli {
    /// Config file (defaults to <config dir>/pkgmart/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Start on the developer page
    #[arg(long)]
    dev: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    write_config: bool,
}

fn apply_overrides(cfg: &mut config::AppConfig, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        cfg.api.base_url = url.clone();
    }
    if cli.dev {
        cfg.ui.start_page = config::Page::Developer;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config(cli.config.as_deref())?;
    apply_overrides(&mut cfg, &cli);

    if cli.write_config {
        let path = config::save_config(&cfg, cli.config.as_deref())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(path) = logging::init(&cfg.logging)? {
        info!(log = %path.display(), api = %cfg.api.base_url, "pkgmart starting");
    }

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let api = ApiManager::new(ApiClient::new(cfg.api.base_url.clone()), event_tx.clone());
    let mut state = AppState::new(cfg);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task for the status bar clock
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Every view model is fetched once at startup
    for target in RefreshTarget::ALL {
        api.refresh(target);
    }

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event)?;

        for action in actions {
            match action {
                Action::Submit {
                    dialog_id,
                    operation,
                    request,
                } => api.submit(dialog_id, operation, request),
                Action::Refresh { targets } => {
                    for target in targets {
                        api.refresh(target);
                    }
                }
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            info!("quit requested");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
