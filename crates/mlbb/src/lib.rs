//! MLBB bot core.
//!
//! Ties the upstream client, hero cache and registration store together
//! behind one configuration and logging setup, and adds the draft helpers
//! (counter suggestions, team synergy, random picks) built on them.
//!
//! # Example
//!
//! ```no_run
//! use mlbb::{HeroCache, HeroResolver, MlbbApiClient, MlbbConfig};
//!
//! # async fn example() -> mlbb::MlbbResult<()> {
//! let config = MlbbConfig::load()?;
//! let client = MlbbApiClient::new(config.api().clone())?;
//! let cache = HeroCache::new(client, config.cache().clone());
//! cache.refresh().await?;
//!
//! let resolver = HeroResolver::new(mlbb::LevenshteinMatcher, *config.cache().fuzzy_threshold());
//! if let Some(hero) = resolver.resolve(&cache, "laylaa") {
//!     println!("{} ({})", hero.name, hero.resolution);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod draft;
mod observability;
mod pick;

pub use config::{
    LoggingConfig, LoggingConfigBuilder, MlbbConfig, RegistryConfig, RegistryConfigBuilder,
};
pub use draft::{
    CounterSuggestion, Draft, EVIDENCE_WEIGHT, MAX_PAIR_SCORE, PairSynergy, SynergyReport,
};
pub use observability::init_logging;
pub use pick::{PickSource, PickedHero, random_fallback, random_from_list, random_hero};

pub use mlbb_api::{
    ApiConfig, CounterGroup, CounterPick, DaysWindow, FALLBACK_ROSTER, HeroDetail, HeroEntry,
    HeroId, HeroRanking, HeroSource, Matchup, MatchupBook, MlbbApiClient, RankFilter, Relation,
    matchup_key,
};
pub use mlbb_cache::{
    CacheConfig, CacheStatus, HeroCache, HeroResolver, LevenshteinMatcher, NameMatcher,
    RefreshHandle, Resolution, ResolvedHero, Snapshot, spawn_refresh_loop,
};
pub use mlbb_error::{MlbbError, MlbbErrorKind, MlbbResult};
pub use mlbb_registry::{Bracket, DuoEntry, RegistrationStore, Registrations, SoloEntry};
