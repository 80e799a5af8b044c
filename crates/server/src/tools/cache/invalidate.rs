//! cache_invalidate tool implementation.
//!
//! Removes the cached result for one query, identified the same way
//! sparql_query identifies it.

use legilux_core::cache::QueryFingerprint;
use legilux_core::{CacheKey, Error, ResultFormat};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the cache_invalidate tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheInvalidateParams {
    /// SPARQL query text whose cached result should be dropped.
    pub query: String,

    /// Format the result was cached in (server default if omitted).
    #[serde(default)]
    pub format: Option<ResultFormat>,

    /// Limit the result was requested with.
    #[serde(default)]
    pub limit: Option<u32>,

    /// Offset the result was requested with.
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Output from the cache_invalidate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheInvalidateOutput {
    /// Whether an entry was removed.
    pub invalidated: bool,
}

/// Implementation of the cache_invalidate tool.
pub async fn invalidate_impl(state: &AppState, params: CacheInvalidateParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let cache = state.require_cache()?;
    let key = CacheKey::for_query(&QueryFingerprint {
        query: &params.query,
        endpoint: state.service.endpoint(),
        format: params.format.unwrap_or(state.config.default_format),
        limit: params.limit,
        offset: params.offset,
    });

    let invalidated = cache.invalidate(&key);
    tracing::debug!(key = %key, invalidated, "cache invalidate");

    let output = CacheInvalidateOutput { invalidated };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
