//! Cache refresh configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and concurrency settings for the hero cache.
///
/// ```toml
/// [cache]
/// refresh_interval_secs = 3600
/// detail_timeout_secs = 10
/// max_in_flight = 16
/// fuzzy_threshold = 80.0
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CacheConfig {
    /// Period between refresh cycles (seconds)
    #[serde(default = "default_refresh_interval_secs")]
    refresh_interval_secs: u64,

    /// Upper bound on the hero list fetch (seconds)
    #[serde(default = "default_list_timeout_secs")]
    list_timeout_secs: u64,

    /// Upper bound on each hero detail fetch (seconds)
    #[serde(default = "default_detail_timeout_secs")]
    detail_timeout_secs: u64,

    /// Upper bound on the whole detail fan-out (seconds)
    #[serde(default = "default_refresh_timeout_secs")]
    refresh_timeout_secs: u64,

    /// Maximum detail fetches in flight at once
    #[serde(default = "default_max_in_flight")]
    max_in_flight: usize,

    /// Minimum similarity (0-100) for a fuzzy name match
    #[serde(default = "default_fuzzy_threshold")]
    fuzzy_threshold: f64,
}

fn default_refresh_interval_secs() -> u64 {
    3600 // hourly
}

fn default_list_timeout_secs() -> u64 {
    15
}

fn default_detail_timeout_secs() -> u64 {
    10
}

fn default_refresh_timeout_secs() -> u64 {
    120
}

fn default_max_in_flight() -> usize {
    16
}

fn default_fuzzy_threshold() -> f64 {
    80.0
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            list_timeout_secs: default_list_timeout_secs(),
            detail_timeout_secs: default_detail_timeout_secs(),
            refresh_timeout_secs: default_refresh_timeout_secs(),
            max_in_flight: default_max_in_flight(),
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

impl CacheConfig {
    /// Refresh period as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Hero list timeout as a [`Duration`].
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs.max(1))
    }

    /// Per-detail timeout as a [`Duration`].
    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs.max(1))
    }

    /// Fan-out deadline as a [`Duration`].
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs.max(1))
    }

    /// Concurrency cap, never below one.
    pub fn concurrency(&self) -> usize {
        self.max_in_flight.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_clamped() {
        let config = CacheConfig::default()
            .with_detail_timeout_secs(0)
            .with_max_in_flight(0);
        assert_eq!(config.detail_timeout(), Duration::from_secs(1));
        assert_eq!(config.concurrency(), 1);
    }
}
