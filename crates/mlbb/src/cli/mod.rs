//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the mlbb binary.

mod commands;
mod draft;
mod heroes;
mod registrations;

pub use commands::{Cli, Commands};

use anyhow::Result;
use mlbb::MlbbConfig;

/// Run the selected command.
pub async fn dispatch(command: Commands, config: &MlbbConfig) -> Result<()> {
    match command {
        Commands::Serve => heroes::serve(config).await,
        Commands::Hero { name } => heroes::show_hero(config, &name.join(" ")).await,
        Commands::Ranks { rank, days, limit } => {
            heroes::show_ranks(config, &rank, days, limit).await
        }
        Commands::Counter { enemy, limit, .. } if !enemy.is_empty() => {
            draft::counter_lineup(config, &enemy, limit.unwrap_or(5)).await
        }
        Commands::Counter { name, limit, .. } => {
            heroes::show_counters(config, &name.join(" "), limit.unwrap_or(3)).await
        }
        Commands::Synergy { heroes } => draft::synergy(config, &heroes).await,
        Commands::Matchup { name } => draft::matchup(config, &name.join(" ")).await,
        Commands::Groups { key } => draft::groups(key.as_deref()),
        Commands::Pick => heroes::pick(config).await,
        Commands::Status => heroes::status(config).await,
        Commands::Refresh => heroes::refresh(config).await,
        Commands::Register(command) => registrations::register(config, command).await,
        Commands::Withdraw { bracket, user_id } => {
            registrations::withdraw(config, bracket.into(), &user_id).await
        }
        Commands::Registrations { format } => registrations::list(config, format).await,
    }
}
