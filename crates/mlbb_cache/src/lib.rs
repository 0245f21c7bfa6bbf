//! Hero data cache for the MLBB bot.
//!
//! Holds an immutable [`Snapshot`] of hero identities and detail documents
//! behind an atomic pointer. Refreshes rebuild the snapshot from scratch,
//! fan detail fetches out with bounded concurrency, tolerate per-hero
//! failures, and swap the result in as a single step.
//!
//! Name resolution beyond exact lookup is a consumer policy and lives in
//! [`HeroResolver`].

#![warn(missing_docs)]

mod cache;
mod config;
mod matcher;
mod refresh;
mod snapshot;

pub use cache::{CacheStatus, HeroCache};
pub use config::{CacheConfig, CacheConfigBuilder};
pub use matcher::{HeroResolver, LevenshteinMatcher, NameMatcher, Resolution, ResolvedHero};
pub use mlbb_error::{CacheError, CacheErrorKind};
pub use refresh::{RefreshHandle, spawn_refresh_loop};
pub use snapshot::{Snapshot, fold_name};

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
