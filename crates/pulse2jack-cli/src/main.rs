//! Pulse2JACK bridges - edit the PulseAudio to JACK bridge list.
//!
//! Loads the bridge list from the settings database, applies one command and
//! regenerates the `jack-connections` file read by the bridging process.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Command;
use pulse2jack_core::{BridgeList, ConnectionFile};
use pulse2jack_db::Database;

#[derive(Parser)]
#[command(name = "pulse2jack-bridges")]
#[command(version, about = "Manage PulseAudio to JACK bridges")]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.general.log_level))
                .context("Invalid log level")?,
        )
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "Starting pulse2jack-bridges");
    debug!(config_file = ?cli.config, ?config, "Configuration loaded");

    let db = match &config.settings.path {
        Some(path) => Database::open_at(path.clone()),
        None => Database::open(),
    }
    .context("Failed to open settings database")?;

    let connections = match &config.connections.config_dir {
        Some(dir) => ConnectionFile::new(dir),
        None => ConnectionFile::from_env().context("Failed to locate Pulse config directory")?,
    };

    let mut list = BridgeList::new(db, connections).context("Failed to load bridges")?;
    list.subscribe(|event| info!(?event, "Bridge list changed"));

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut list, &mut stdout)
}
