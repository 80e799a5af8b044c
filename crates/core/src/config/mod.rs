//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LEGILUX_*)
//! 2. TOML config file (if LEGILUX_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{PolicyKind, ResultFormat};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LEGILUX_*), nested keys split on `__`
/// 2. TOML config file (if LEGILUX_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SPARQL endpoint queried on cache misses.
    ///
    /// Set via LEGILUX_ENDPOINT_URL environment variable.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LEGILUX_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via LEGILUX_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Result format used when a tool call does not name one.
    ///
    /// Set via LEGILUX_DEFAULT_FORMAT environment variable.
    #[serde(default)]
    pub default_format: ResultFormat,

    /// Whether formatted results carry a `metadata` block.
    ///
    /// Set via LEGILUX_INCLUDE_METADATA environment variable.
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Query result cache settings (LEGILUX_CACHE__*).
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Settings for the in-memory query result cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether results are cached at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached results.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Eviction policy: lru, lfu or fifo.
    #[serde(default)]
    pub policy: PolicyKind,

    /// TTL in seconds for entries stored without an explicit one.
    /// `None` keeps such entries until evicted.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: Option<i64>,

    /// Seconds between background sweeps of expired entries; 0 disables.
    #[serde(default)]
    pub sweep_interval_secs: u64,
}

fn default_endpoint_url() -> String {
    "https://data.legilux.public.lu/sparqlendpoint".into()
}

fn default_user_agent() -> String {
    "mcp-legilux/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_capacity() -> usize {
    100
}

fn default_ttl_secs() -> Option<i64> {
    Some(300)
}

fn default_true() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_capacity(),
            policy: PolicyKind::default(),
            default_ttl_secs: default_ttl_secs(),
            sweep_interval_secs: 0,
        }
    }
}

impl CacheConfig {
    /// Default TTL as a chrono duration for the cache.
    ///
    /// Seconds beyond chrono's range saturate to [`chrono::TimeDelta::MAX`].
    pub fn default_ttl(&self) -> Option<chrono::Duration> {
        self.default_ttl_secs
            .map(|secs| chrono::Duration::try_seconds(secs).unwrap_or(chrono::TimeDelta::MAX))
    }

    /// Sweep interval, if sweeping is enabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            default_format: ResultFormat::default(),
            include_metadata: true,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LEGILUX_`
    /// 2. TOML file from `LEGILUX_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LEGILUX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LEGILUX_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
