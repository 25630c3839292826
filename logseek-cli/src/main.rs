//! Logseek CLI - Command-line interface
//!
//! Provides the one-shot search, the interactive terminal page and the search
//! service behind a single binary.

mod commands;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use logseek_core::RuntimeMode;
use logseek_core::config::LogseekConfig;
use logseek_core::tracing_setup::{CliLogLevel, init_tracing};

/// Main CLI structure for Logseek.
///
/// Global options apply to every subcommand and override environment
/// configuration.
#[derive(Parser)]
#[command(name = "logseek")]
#[command(about = "Search log events from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Search endpoint URL (overrides LOGSEEK_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Runtime mode: production queries the endpoint, development uses demo events
    #[arg(long, global = true, default_value = "production")]
    mode: RuntimeMode,

    /// Console log level (RUST_LOG takes precedence when set)
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Directory for the debug log file
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal page owns the screen, so console logging stays off there
    let console_level = match cli.command {
        commands::Commands::Tui => None,
        _ => Some(cli.log_level.as_tracing_level()),
    };
    init_tracing(console_level, cli.logs_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let mut config = LogseekConfig::from_env();
    if let Some(endpoint) = cli.endpoint {
        config.service.endpoint = endpoint;
    }

    tracing::debug!(mode = %cli.mode, endpoint = %config.service.endpoint, "Starting logseek");
    commands::handle_command(cli.command, config, cli.mode).await
}
