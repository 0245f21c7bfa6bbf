//! Client for the public Mobile Legends: Bang Bang statistics API.
//!
//! The upstream is a third-party service whose JSON shape is not guaranteed
//! stable, so every nested path is read defensively. The [`HeroSource`] trait
//! is the seam the hero cache depends on; [`MlbbApiClient`] is the reqwest
//! implementation. [`MatchupBook`] carries the curated matchup tables and
//! counter groups that ship with the crate.
//!
//! # Example
//!
//! ```no_run
//! use mlbb_api::{ApiConfig, HeroSource, MlbbApiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MlbbApiClient::new(ApiConfig::default())?;
//! let heroes = client.hero_list().await?;
//! println!("{} heroes known upstream", heroes.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod matchups;
mod parse;
mod roster;
mod source;
mod stats;
mod types;

pub use client::MlbbApiClient;
pub use config::{ApiConfig, ApiConfigBuilder};
pub use matchups::{CounterGroup, Matchup, MatchupBook, matchup_key};
pub use mlbb_error::{JsonError, UpstreamError, UpstreamErrorKind};
pub use parse::{parse_counters, parse_hero_list, parse_rankings};
pub use roster::FALLBACK_ROSTER;
pub use source::HeroSource;
pub use stats::{CounterPick, DaysWindow, HeroRanking, RankFilter};
pub use types::{HeroDetail, HeroEntry, HeroId, Relation, value_at};

/// Result type for upstream operations.
pub type ApiResult<T> = Result<T, UpstreamError>;
