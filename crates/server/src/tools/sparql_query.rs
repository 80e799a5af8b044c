//! sparql_query tool implementation.
//!
//! Runs a SPARQL query through the result cache.

use std::sync::Arc;

use legilux_client::{SparqlRequest, format_results};
use legilux_core::cache::QueryFingerprint;
use legilux_core::{CacheKey, Error, ResultFormat};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::AppState;

/// Input parameters for sparql_query tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SparqlQueryParams {
    /// SPARQL query text (required).
    pub query: String,

    /// Result format: json, simplified or tabular (server default if omitted).
    #[serde(default)]
    pub format: Option<ResultFormat>,

    /// Maximum rows (1-10000). Ignored when the query has its own LIMIT.
    #[serde(default)]
    pub limit: Option<u32>,

    /// Rows to skip.
    #[serde(default)]
    pub offset: Option<u32>,

    /// Seconds to keep this result cached (server default if omitted).
    #[serde(default)]
    pub ttl_secs: Option<i64>,

    /// Skip the cache lookup and re-run the query. The fresh result is still cached.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for sparql_query tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SparqlQueryOutput {
    /// Format the result is rendered in.
    pub format: ResultFormat,
    /// Whether the result came from the cache.
    pub cache_hit: bool,
    /// Formatted query result.
    pub result: Value,
}

/// Implementation of the sparql_query tool.
pub async fn query_impl(state: &AppState, params: SparqlQueryParams) -> Result<CallToolResult, McpError> {
    let output = run_query(state, params).await?;
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

async fn run_query(state: &AppState, params: SparqlQueryParams) -> Result<SparqlQueryOutput, Error> {
    let format = params.format.unwrap_or(state.config.default_format);
    let request = SparqlRequest { query: params.query, limit: params.limit, offset: params.offset };
    request.validate()?;

    let ttl = match params.ttl_secs {
        Some(secs) if secs <= 0 => return Err(Error::InvalidTtl(secs)),
        Some(secs) => Some(chrono::Duration::try_seconds(secs).unwrap_or(chrono::TimeDelta::MAX)),
        None => None,
    };

    let Some(cache) = state.cache.as_deref() else {
        let result = execute(state, &request, format).await?;
        return Ok(SparqlQueryOutput { format, cache_hit: false, result: Arc::unwrap_or_clone(result) });
    };

    let key = CacheKey::for_query(&QueryFingerprint {
        query: &request.query,
        endpoint: state.service.endpoint(),
        format,
        limit: request.limit,
        offset: request.offset,
    });

    let _guard = state.locks.acquire(&key).await;

    if !params.force_refresh
        && let Some(cached) = cache.get(&key)
    {
        tracing::debug!(key = %key, "cache hit for SPARQL query");
        return Ok(SparqlQueryOutput { format, cache_hit: true, result: Arc::unwrap_or_clone(cached) });
    }

    let result = execute(state, &request, format).await?;
    cache.put(key, Arc::clone(&result), ttl)?;

    Ok(SparqlQueryOutput { format, cache_hit: false, result: Arc::unwrap_or_clone(result) })
}

async fn execute(state: &AppState, request: &SparqlRequest, format: ResultFormat) -> Result<Arc<Value>, Error> {
    let query = request.effective_query();
    let raw = state.service.execute(&query).await?;
    Ok(Arc::new(format_results(&raw, format, state.format_options(), Some(&query))))
}
