mod api;
mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod time_utils;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::{request_channel, App};
use clap::Parser;
use cli::{Cli, Commands};
use config::TxdashConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env.txdash
    dotenvy::from_filename(".env.txdash").ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::ConfigPath => {
            let path = TxdashConfig::ensure_default_file()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => {
            let cfg = TxdashConfig::load()?;
            let client = api::ApiClient::new(&cfg.api_url)?;
            run(cfg, client).await
        }
        Commands::Dev => {
            let cfg = TxdashConfig::load()?;
            let client = api::ApiClient::dev()?;
            run(cfg, client).await
        }
    }
}

async fn run(cfg: TxdashConfig, client: api::ApiClient) -> Result<()> {
    let log_path = logging::init()?;
    tracing::info!(api = %client.base_url(), log = %log_path.display(), "starting txdash-tui");

    let (requests_tx, requests_rx) = request_channel();
    let mut app = App::new(&cfg, requests_tx);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client, requests_rx, cfg.polling).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("dashboard exited with error: {:#}", err);
        eprintln!("Error: {:?}", err);
    }

    println!("Goodbye!");
    Ok(())
}
