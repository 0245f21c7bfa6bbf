//! Upstream API configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint layout and transport settings for the hero statistics API.
///
/// Path templates are joined onto `base_url`. `{id}` is replaced by the hero
/// id, `{rank}` and `{days}` by the ranking filters.
///
/// ```toml
/// [api]
/// base_url = "https://api-mobilelegends.vercel.app/api/"
/// hero_detail_path = "hero-detail/{id}/"
/// request_timeout_secs = 10
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct ApiConfig {
    /// Root URL every path is joined onto
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Path of the hero list endpoint
    #[serde(default = "default_hero_list_path")]
    hero_list_path: String,

    /// Path template of the hero detail endpoint
    #[serde(default = "default_hero_detail_path")]
    hero_detail_path: String,

    /// Path template of the ranking endpoint
    #[serde(default = "default_hero_rank_path")]
    hero_rank_path: String,

    /// Path template of the counter endpoint
    #[serde(default = "default_hero_counter_path")]
    hero_counter_path: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

fn default_base_url() -> String {
    "https://api-mobilelegends.vercel.app/api/".to_string()
}

fn default_hero_list_path() -> String {
    "hero-list/".to_string()
}

fn default_hero_detail_path() -> String {
    "hero-detail/{id}/".to_string()
}

fn default_hero_rank_path() -> String {
    "hero-rank/?rank={rank}&days={days}".to_string()
}

fn default_hero_counter_path() -> String {
    "hero-counter/{id}/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("mlbb/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            hero_list_path: default_hero_list_path(),
            hero_detail_path: default_hero_detail_path(),
            hero_rank_path: default_hero_rank_path(),
            hero_counter_path: default_hero_counter_path(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Join a relative path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_without_double_slash() {
        let config = ApiConfig::default().with_base_url("http://localhost:9000/api/".to_string());
        assert_eq!(
            config.url_for("/hero-list/"),
            "http://localhost:9000/api/hero-list/"
        );
    }

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = ApiConfigBuilder::default()
            .request_timeout_secs(3)
            .build()
            .unwrap();
        assert_eq!(*config.request_timeout_secs(), 3);
        assert_eq!(config.hero_list_path(), "hero-list/");
    }
}
