//! MLBB CLI binary.
//!
//! Operator access to the bot core:
//! - Keep the hero cache refreshed (`serve`)
//! - Query heroes, rankings and counters
//! - Manage tournament registrations

use anyhow::Result;
use clap::Parser;
use mlbb::{MlbbConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    use cli::{Cli, dispatch};

    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MlbbConfig::from_file(path)?,
        None => MlbbConfig::load()?,
    };

    // Initialize tracing
    let mut logging = config.logging().clone();
    if cli.verbose {
        logging = logging.with_level("debug".to_string());
    }
    if cli.json_logs {
        logging = logging.with_json(true);
    }
    init_logging(&logging)?;

    tracing::debug!(command = ?cli.command, "Dispatching command");
    dispatch(cli.command, &config).await
}
