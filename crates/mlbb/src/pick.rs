//! Random hero selection.

use mlbb_api::{FALLBACK_ROSTER, HeroEntry};
use mlbb_cache::HeroCache;
use rand::Rng;
use rand::seq::SliceRandom;

/// Where a picked hero came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PickSource {
    /// The installed cache snapshot
    #[display("live roster")]
    Snapshot,
    /// A hero list fetched for this pick
    #[display("upstream list")]
    Upstream,
    /// The built-in roster, used when no live list is available
    #[display("fallback roster")]
    Fallback,
}

/// A randomly chosen hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedHero {
    /// Display name
    pub name: String,
    /// Roster it was drawn from
    pub source: PickSource,
}

/// Pick a hero from the cache, or from [`FALLBACK_ROSTER`] if the cache has
/// no snapshot yet.
pub fn random_hero<S, R: Rng + ?Sized>(cache: &HeroCache<S>, rng: &mut R) -> PickedHero {
    let names = cache.hero_names();
    match names.choose(rng) {
        Some(name) => PickedHero {
            name: name.clone(),
            source: PickSource::Snapshot,
        },
        None => random_fallback(rng),
    }
}

/// Pick a hero from a freshly fetched list, or from [`FALLBACK_ROSTER`] if
/// the list is empty.
pub fn random_from_list<R: Rng + ?Sized>(entries: &[HeroEntry], rng: &mut R) -> PickedHero {
    match entries.choose(rng) {
        Some(entry) => PickedHero {
            name: entry.name.clone(),
            source: PickSource::Upstream,
        },
        None => random_fallback(rng),
    }
}

/// Pick from the built-in roster.
pub fn random_fallback<R: Rng + ?Sized>(rng: &mut R) -> PickedHero {
    let name = FALLBACK_ROSTER.choose(rng).copied().unwrap_or("Layla");
    tracing::debug!(hero = name, "Picked from fallback roster");
    PickedHero {
        name: name.to_string(),
        source: PickSource::Fallback,
    }
}
