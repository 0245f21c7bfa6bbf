//! Layered configuration.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use mlbb_api::ApiConfig;
use mlbb_cache::CacheConfig;
use mlbb_error::{ConfigError, MlbbResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../mlbb.toml");

/// Registration store settings.
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
pub struct RegistryConfig {
    /// JSON document holding solo and duo registrations
    #[serde(default = "default_registry_path")]
    path: PathBuf,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("data/registrations.json")
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

/// Log output settings.
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
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    level: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Top-level configuration for the bot core.
///
/// ```toml
/// [api]
/// request_timeout_secs = 10
///
/// [cache]
/// refresh_interval_secs = 3600
///
/// [registry]
/// path = "data/registrations.json"
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct MlbbConfig {
    /// Upstream API endpoints and timeouts
    #[serde(default)]
    api: ApiConfig,
    /// Hero cache refresh settings
    #[serde(default)]
    cache: CacheConfig,
    /// Registration store settings
    #[serde(default)]
    registry: RegistryConfig,
    /// Log output settings
    #[serde(default)]
    logging: LoggingConfig,
}

impl MlbbConfig {
    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> MlbbResult<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Load configuration with precedence (later sources override earlier):
    ///
    /// 1. Bundled defaults (mlbb.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/mlbb/mlbb.toml)
    /// 3. User config in current directory (./mlbb.toml)
    /// 4. Environment variables `MLBB_<SECTION>__<KEY>`
    ///
    /// User config files are optional and skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load() -> MlbbResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mlbb/mlbb.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("mlbb").required(false))
            .add_source(
                Environment::with_prefix("MLBB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Parse the bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is invalid.
    pub fn bundled() -> MlbbResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }
}
