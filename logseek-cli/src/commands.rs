//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use logseek_core::config::LogseekConfig;
use logseek_core::{RuntimeMode, start_session};

use crate::tui;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the result page
    Search {
        /// Query text, sent as typed
        query: String,
    },
    /// Open the interactive search page
    Tui,
    /// Run the search service over a directory of event files
    Serve {
        /// Directory holding *.jsonl event files (*.parquet too with the parquet feature)
        #[arg(long)]
        events_dir: PathBuf,
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides LOGSEEK_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the failure of the command that ran; search failures are part of
/// the printed page, not errors.
pub async fn handle_command(
    command: Commands,
    config: LogseekConfig,
    mode: RuntimeMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Search { query } => search_once(query, &config, mode).await,
        Commands::Tui => run_page(&config, mode).await,
        Commands::Serve {
            events_dir,
            host,
            port,
        } => serve(events_dir, host, port, config).await,
    }
}

/// Submit one query, wait for it to resolve and print the page as text.
///
/// # Errors
/// - Configuration is invalid or the session stopped unexpectedly
pub async fn search_once(
    query: String,
    config: &LogseekConfig,
    mode: RuntimeMode,
) -> anyhow::Result<()> {
    let handle = start_session(config, mode).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    handle.search(query).await?;
    handle.settled().await?;
    println!("{}", handle.render());

    handle.shutdown().await?;
    Ok(())
}

/// Run the interactive page until the user quits.
///
/// # Errors
/// - Configuration is invalid or the terminal could not be driven
pub async fn run_page(config: &LogseekConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    let handle = start_session(config, mode).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let result = tui::run(handle.clone()).await;
    let _ = handle.shutdown().await;
    result
}

/// Load event files and serve the search API.
///
/// # Errors
/// - Event directory has no loadable files or the address cannot be bound
pub async fn serve(
    events_dir: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    mut config: LogseekConfig,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let index = logseek_web::load_event_dir(&events_dir)
        .await
        .with_context(|| format!("Failed to load events from {}", events_dir.display()))?;

    logseek_web::run_server(&config.server, index).await?;
    Ok(())
}
