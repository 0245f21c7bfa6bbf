//! Draft commands: line-up counters, synergy, matchups and counter groups.

use super::heroes::{build_cache, resolver};
use anyhow::{Context, Result, bail};
use mlbb::{Draft, HeroCache, MatchupBook, MlbbApiClient, MlbbConfig, Relation, Snapshot};
use std::sync::Arc;
use tracing::warn;

fn book() -> Result<MatchupBook> {
    MatchupBook::bundled().context("loading bundled matchup tables")
}

/// Refresh once; the curated tables still work if the upstream is down.
async fn live_snapshot(cache: &HeroCache<MlbbApiClient>) -> Option<Arc<Snapshot>> {
    match cache.refresh().await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e.kind, "Live hero data unavailable; using curated tables only");
            None
        }
    }
}

/// Canonical spelling of `name`: the snapshot's (exact, then fuzzy), else the
/// curated table's.
fn canonical(
    config: &MlbbConfig,
    snapshot: Option<&Snapshot>,
    book: &MatchupBook,
    name: &str,
) -> Result<String> {
    if let Some(hero) = snapshot.and_then(|s| resolver(config).resolve_in(s, name)) {
        return Ok(hero.name);
    }
    match book.matchup(name) {
        Some(row) => Ok(row.hero().clone()),
        None => bail!("Hero '{}' not found. Please check the spelling.", name),
    }
}

fn canonical_all(
    config: &MlbbConfig,
    snapshot: Option<&Snapshot>,
    book: &MatchupBook,
    names: &[String],
) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| canonical(config, snapshot, book, name))
        .collect()
}

/// `mlbb counter --enemy <heroes...>`
pub async fn counter_lineup(config: &MlbbConfig, enemies: &[String], limit: usize) -> Result<()> {
    let book = book()?;
    let cache = build_cache(config)?;
    let snapshot = live_snapshot(&cache).await;
    let enemies = canonical_all(config, snapshot.as_deref(), &book, enemies)?;

    let draft = Draft::new(&book, snapshot.as_deref());
    let suggestions = draft.recommend_counters(&enemies, limit);
    if suggestions.is_empty() {
        println!("No effective counters found.");
        return Ok(());
    }

    println!("Recommended counters against {}:", enemies.join(", "));
    for suggestion in &suggestions {
        println!(
            "- {} (counter score: {:.2}; beats {})",
            suggestion.name,
            suggestion.score,
            suggestion.against.join(", ")
        );
    }
    Ok(())
}

/// `mlbb synergy <heroes...>`
pub async fn synergy(config: &MlbbConfig, heroes: &[String]) -> Result<()> {
    let book = book()?;
    let cache = build_cache(config)?;
    let snapshot = live_snapshot(&cache).await;
    let team = canonical_all(config, snapshot.as_deref(), &book, heroes)?;

    let report = Draft::new(&book, snapshot.as_deref()).team_synergy(&team);
    println!("Team synergy score: {:.2}/10", report.score);
    for pair in &report.rated {
        println!("  {} + {}: {:.0}", pair.first, pair.second, pair.score);
    }
    if report.unrated > 0 {
        println!("  {} pair(s) with no known synergy", report.unrated);
    }
    if !report.missing_detail.is_empty() {
        println!(
            "  No detail this cycle for: {}",
            report.missing_detail.join(", ")
        );
    }
    Ok(())
}

/// `mlbb matchup <name>`
pub async fn matchup(config: &MlbbConfig, name: &str) -> Result<()> {
    let book = book()?;
    let cache = build_cache(config)?;
    let snapshot = live_snapshot(&cache).await;
    let hero = canonical(config, snapshot.as_deref(), &book, name)?;

    println!("{}", hero);
    match book.matchup(&hero) {
        Some(row) => {
            println!("  Strong against: {}", listing(row.strong_against()));
            println!("  Weak against:   {}", listing(row.weak_against()));
        }
        None => println!("  No curated matchups"),
    }

    if let Some(snapshot) = snapshot.as_deref()
        && let Some(detail) = snapshot
            .lookup_by_name(&hero)
            .and_then(|id| snapshot.get_detail(id))
    {
        for relation in [Relation::Assist, Relation::Strong, Relation::Weak] {
            let names: Vec<String> = detail
                .relation(relation)
                .iter()
                .filter_map(|id| snapshot.display_name(id).map(str::to_string))
                .collect();
            if !names.is_empty() {
                println!("  Live {}: {}", relation, names.join(", "));
            }
        }
    }

    let groups = book.groups_for(&hero);
    if !groups.is_empty() {
        let titles: Vec<String> = groups.iter().map(|group| group.title()).collect();
        println!("  Counter groups: {}", titles.join(", "));
    }
    Ok(())
}

/// `mlbb groups [key]`
pub fn groups(key: Option<&str>) -> Result<()> {
    let book = book()?;

    let Some(key) = key else {
        for group in book.groups() {
            println!("{:<28} {}", group.key(), group.heroes().join(", "));
        }
        return Ok(());
    };

    let Some(group) = book.group(key) else {
        bail!("Unknown counter group '{}'. Run `mlbb groups` for the list.", key);
    };
    println!("{}", group.title());
    println!("  {}", group.reason());
    println!("  Heroes: {}", group.heroes().join(", "));
    if !group.counters().is_empty() {
        println!("  Answers: {}", group.counters().join(", "));
    }
    if !group.spells().is_empty() {
        println!("  Spells: {}", group.spells().join(", "));
    }
    if !group.items().is_empty() {
        println!("  Items: {}", group.items().join(", "));
    }
    for tip in group.tips() {
        println!("  - {}", tip);
    }
    Ok(())
}

fn listing(names: &[String]) -> String {
    if names.is_empty() {
        "N/A".to_string()
    } else {
        names.join(", ")
    }
}
