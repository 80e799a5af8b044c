//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Largest cache capacity accepted from configuration.
const MAX_CACHE_CAPACITY: usize = 100_000;

/// Longest default TTL accepted from configuration (one year).
const MAX_DEFAULT_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `endpoint_url` is empty.
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `endpoint_url` is not an http(s) URL
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `cache.capacity` is 0 or exceeds 100000
    /// - `cache.default_ttl_secs` is zero, negative or longer than one year
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "endpoint_url".into(),
                hint: "set LEGILUX_ENDPOINT_URL to the SPARQL endpoint".into(),
            });
        }
        match Url::parse(&self.endpoint_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "endpoint_url".into(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "endpoint_url".into(), reason: e.to_string() });
            }
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache.capacity == 0 {
            return Err(ConfigError::Invalid { field: "cache.capacity".into(), reason: "must be greater than 0".into() });
        }
        if self.cache.capacity > MAX_CACHE_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "cache.capacity".into(),
                reason: format!("must not exceed {MAX_CACHE_CAPACITY}"),
            });
        }

        if matches!(self.cache.default_ttl_secs, Some(ttl) if ttl <= 0) {
            return Err(ConfigError::Invalid {
                field: "cache.default_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if matches!(self.cache.default_ttl_secs, Some(ttl) if ttl > MAX_DEFAULT_TTL_SECS) {
            return Err(ConfigError::Invalid {
                field: "cache.default_ttl_secs".into(),
                reason: format!("must not exceed {MAX_DEFAULT_TTL_SECS}"),
            });
        }

        if self.cache.sweep_interval_secs > 0 && self.cache.default_ttl_secs.is_none() {
            tracing::warn!(
                sweep_interval_secs = self.cache.sweep_interval_secs,
                "Sweep interval is set but cache.default_ttl_secs is not; \
                 only entries stored with an explicit TTL will expire"
            );
        }

        if !self.cache.enabled {
            tracing::info!("Query cache disabled by configuration");
        }

        Ok(())
    }
}
