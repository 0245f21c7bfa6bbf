//! Tournament registration commands.

use super::commands::{OutputFormat, RegisterCommands};
use anyhow::{Context, Result};
use chrono::Utc;
use mlbb::{Bracket, DuoEntry, MlbbConfig, RegistrationStore, SoloEntry};

async fn open_store(config: &MlbbConfig) -> Result<RegistrationStore> {
    let store = RegistrationStore::open(config.registry().path())
        .await
        .context("opening registration store")?;
    if let Some(e) = store.recovered_from() {
        eprintln!(
            "warning: {} could not be read ({}); starting from an empty list",
            store.path().display(),
            e.kind
        );
    }
    Ok(store)
}

/// `mlbb register solo|duo`
pub async fn register(config: &MlbbConfig, command: RegisterCommands) -> Result<()> {
    let store = open_store(config).await?;

    match command {
        RegisterCommands::Solo {
            user_id,
            name,
            game_id,
            rank,
        } => {
            store
                .register_solo(SoloEntry::new(user_id, name.clone(), game_id, rank))
                .await
                .context("solo registration rejected")?;
            println!("Registered {} for the solo bracket", name);
        }
        RegisterCommands::Duo {
            user_id,
            partner_id,
            name,
            partner_name,
            game_id,
            partner_game_id,
            rank,
        } => {
            let summary = format!("{} and {}", name, partner_name);
            store
                .register_duo(DuoEntry {
                    user_id,
                    display_name: name,
                    partner_id,
                    partner_name,
                    game_id,
                    partner_game_id,
                    rank,
                    registered_at: Utc::now(),
                })
                .await
                .context("duo registration rejected")?;
            println!("Registered {} for the duo bracket", summary);
        }
    }
    Ok(())
}

/// `mlbb withdraw <bracket> <user>`
pub async fn withdraw(config: &MlbbConfig, bracket: Bracket, user_id: &str) -> Result<()> {
    let store = open_store(config).await?;
    if store.withdraw(bracket, user_id).await? {
        println!("Withdrew {} from the {} bracket", user_id, bracket);
    } else {
        println!("{} has no {} registration", user_id, bracket);
    }
    Ok(())
}

/// `mlbb registrations`
pub async fn list(config: &MlbbConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config).await?;
    let registrations = store.registrations().await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registrations)?);
        }
        OutputFormat::Human => {
            println!("Solo ({})", registrations.solo.len());
            for (idx, entry) in registrations.solo.iter().enumerate() {
                println!(
                    "{:>3}. {} [{}] game id {}, {}",
                    idx + 1,
                    entry.display_name,
                    entry.user_id,
                    entry.game_id,
                    entry.rank
                );
            }
            println!("Duo ({})", registrations.duo.len());
            for (idx, entry) in registrations.duo.iter().enumerate() {
                println!(
                    "{:>3}. {} [{}] + {} [{}] game ids {} / {}, {}",
                    idx + 1,
                    entry.display_name,
                    entry.user_id,
                    entry.partner_name,
                    entry.partner_id,
                    entry.game_id,
                    entry.partner_game_id,
                    entry.rank
                );
            }
        }
    }
    Ok(())
}
