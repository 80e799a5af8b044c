//! cache_stats tool implementation.
//!
//! Reports cache occupancy, configuration and cumulative counters.

use legilux_core::{Error, PolicyKind};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the cache_stats tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheStatsParams {}

/// Output from the cache_stats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheStatsOutput {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// Entries currently held.
    pub size: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Eviction policy in use.
    pub policy: PolicyKind,
    /// TTL applied to entries stored without one.
    pub default_ttl_secs: Option<i64>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// hits / (hits + misses), 0 when nothing was looked up.
    pub hit_rate: f64,
}

/// Implementation of the cache_stats tool.
pub async fn stats_impl(state: &AppState, _params: CacheStatsParams) -> Result<CallToolResult, McpError> {
    let output = match state.cache.as_deref() {
        Some(cache) => {
            let stats = cache.stats();
            CacheStatsOutput {
                enabled: true,
                size: cache.len(),
                capacity: cache.capacity(),
                policy: cache.policy_kind(),
                default_ttl_secs: cache.default_ttl().map(|ttl| ttl.num_seconds()),
                hits: stats.hits,
                misses: stats.misses,
                evictions: stats.evictions,
                expirations: stats.expirations,
                hit_rate: stats.hit_rate(),
            }
        }
        None => CacheStatsOutput {
            enabled: false,
            size: 0,
            capacity: state.config.cache.capacity,
            policy: state.config.cache.policy,
            default_ttl_secs: state.config.cache.default_ttl_secs,
            hits: 0,
            misses: 0,
            evictions: 0,
            expirations: 0,
            hit_rate: 0.0,
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
