//! Hero data commands.

use anyhow::{Context, Result, bail};
use mlbb::{
    Bracket, DaysWindow, HeroCache, HeroResolver, LevenshteinMatcher, MlbbApiClient, MlbbConfig,
    HeroSource, RankFilter, RegistrationStore, ResolvedHero, random_fallback, random_from_list,
    spawn_refresh_loop,
};
use std::sync::Arc;
use tracing::{info, warn};

pub(super) fn build_cache(config: &MlbbConfig) -> Result<HeroCache<MlbbApiClient>> {
    let client = MlbbApiClient::new(config.api().clone()).context("creating API client")?;
    Ok(HeroCache::new(client, config.cache().clone()))
}

pub(super) fn resolver(config: &MlbbConfig) -> HeroResolver {
    HeroResolver::new(LevenshteinMatcher, *config.cache().fuzzy_threshold())
}

/// Build a cache and run its first refresh.
async fn loaded_cache(config: &MlbbConfig) -> Result<HeroCache<MlbbApiClient>> {
    let cache = build_cache(config)?;
    cache
        .refresh()
        .await
        .context("hero data could not be loaded yet")?;
    Ok(cache)
}

fn resolve(
    config: &MlbbConfig,
    cache: &HeroCache<MlbbApiClient>,
    name: &str,
) -> Result<ResolvedHero> {
    match resolver(config).resolve(cache, name) {
        Some(hero) => Ok(hero),
        None => bail!(
            "Hero '{}' not found. Please check the spelling, or try `mlbb pick` for an example name.",
            name
        ),
    }
}

fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_string(), |r| format!("{:.2}%", r * 100.0))
}

/// `mlbb hero <name>`
pub async fn show_hero(config: &MlbbConfig, name: &str) -> Result<()> {
    let cache = loaded_cache(config).await?;
    let hero = resolve(config, &cache, name)?;

    println!("{} (id {}, {} match)", hero.name, hero.id, hero.resolution);
    match cache.get_detail(&hero.id) {
        Some(detail) => {
            let roles = detail.roles();
            let lanes = detail.lanes();
            println!(
                "  Role: {}",
                if roles.is_empty() { "N/A".to_string() } else { roles.join(", ") }
            );
            println!(
                "  Lane: {}",
                if lanes.is_empty() { "N/A".to_string() } else { lanes.join(", ") }
            );
            if let Some(story) = detail.story() {
                println!("  {}", story);
            }
        }
        None => println!("  Detail unavailable this refresh cycle"),
    }
    Ok(())
}

/// `mlbb ranks`
pub async fn show_ranks(config: &MlbbConfig, rank: &str, days: u32, limit: usize) -> Result<()> {
    let rank = RankFilter::parse_lenient(rank);
    let window = DaysWindow::from_days(days);
    let client = MlbbApiClient::new(config.api().clone()).context("creating API client")?;

    let rows = client
        .hero_rankings(rank, window, limit)
        .await
        .context("fetching hero rankings")?;

    println!("Top {} heroes, {} (past {} days)", rows.len(), rank.title(), window.days());
    for (idx, row) in rows.iter().enumerate() {
        println!(
            "{:>2}. {:<20} win {:>8}  pick {:>8}  ban {:>8}",
            idx + 1,
            row.name,
            percent(row.win_rate),
            percent(row.pick_rate),
            percent(row.ban_rate)
        );
    }
    Ok(())
}

/// `mlbb counter <name>`
pub async fn show_counters(config: &MlbbConfig, name: &str, limit: usize) -> Result<()> {
    let cache = loaded_cache(config).await?;
    let hero = resolve(config, &cache, name)?;

    let counters = cache
        .source()
        .hero_counters(&hero.id, limit)
        .await
        .context("fetching counter data")?;

    if counters.is_empty() {
        println!("No specific counters found for {}", hero.name);
        return Ok(());
    }

    println!("Top counters for {}", hero.name);
    for (idx, counter) in counters.iter().enumerate() {
        println!(
            "{}. {} (win rate increase {})",
            idx + 1,
            counter.name,
            percent(counter.increase_win_rate)
        );
    }
    Ok(())
}

/// `mlbb pick`
pub async fn pick(config: &MlbbConfig) -> Result<()> {
    let client = MlbbApiClient::new(config.api().clone()).context("creating API client")?;
    let mut rng = rand::thread_rng();

    let hero = match client.hero_list().await {
        Ok(entries) => random_from_list(&entries, &mut rng),
        Err(e) => {
            warn!(error = %e.kind, "Hero list unavailable; using fallback roster");
            random_fallback(&mut rng)
        }
    };
    println!("You should play: {} ({})", hero.name, hero.source);
    Ok(())
}

/// `mlbb status`
pub async fn status(config: &MlbbConfig) -> Result<()> {
    let cache = build_cache(config)?;
    if let Err(e) = cache.refresh().await {
        warn!(error = %e.kind, "Refresh failed");
    }

    let status = cache.status();
    println!("{}", status);
    if let Some(at) = status.refreshed_at {
        println!("  refreshed at {}", at.to_rfc3339());
    }
    if let Some(error) = &status.last_error {
        println!("  last error: {}", error);
    }
    Ok(())
}

/// `mlbb refresh`
pub async fn refresh(config: &MlbbConfig) -> Result<()> {
    let cache = build_cache(config)?;
    let snapshot = cache
        .refresh()
        .await
        .context("refreshing hero data")?;

    println!(
        "Hero data refreshed: generation {}, {} heroes, {} with detail",
        snapshot.generation(),
        snapshot.len(),
        snapshot.detail_count()
    );
    Ok(())
}

/// `mlbb serve`
pub async fn serve(config: &MlbbConfig) -> Result<()> {
    let cache = Arc::new(build_cache(config)?);
    let store = RegistrationStore::open(config.registry().path())
        .await
        .context("opening registration store")?;
    let (solo, duo) = (
        store.len(Bracket::Solo).await,
        store.len(Bracket::Duo).await,
    );
    info!(path = %store.path().display(), solo, duo, "Registration store ready");

    let handle = spawn_refresh_loop(Arc::clone(&cache), config.cache().refresh_interval());

    let first_cycle = config.cache().list_timeout() + config.cache().refresh_timeout();
    if cache.wait_until_ready(first_cycle).await {
        info!(status = %cache.status(), "Hero data loaded");
    } else {
        warn!(status = %cache.status(), "Hero data not loaded yet; commands will report it as unavailable");
    }

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("Shutdown requested");
    handle.shutdown().await;
    Ok(())
}
