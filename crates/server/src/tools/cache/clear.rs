//! cache_clear tool implementation.
//!
//! Drops every cached result. Counters are kept.

use legilux_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Parameters for the cache_clear tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearParams {}

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearOutput {
    /// Number of entries removed.
    pub cleared: usize,
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(state: &AppState, _params: CacheClearParams) -> Result<CallToolResult, McpError> {
    let cleared = state.require_cache()?.clear();
    tracing::info!(cleared, "Cleared query cache");

    let output = CacheClearOutput { cleared };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{StubService, select_result, state_with};
    use crate::tools::sparql_query::{SparqlQueryParams, query_impl};
    use legilux_core::CacheConfig;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_removes_entries_keeps_stats() {
        let service = Arc::new(StubService::ok(select_result()));
        let state = state_with(service.clone(), CacheConfig::default());

        for query in ["ASK { ?a ?b ?c }", "ASK { ?x ?y ?z . ?x a ?t }"] {
            let params = SparqlQueryParams { query: query.into(), ..Default::default() };
            query_impl(&state, params).await.unwrap();
        }

        let result = clear_impl(&state, CacheClearParams {}).await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        let output: CacheClearOutput = serde_json::from_str(text).unwrap();

        assert_eq!(output.cleared, 2);
        let cache = state.require_cache().unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[tokio::test]
    async fn test_clear_when_disabled() {
        let service = Arc::new(StubService::ok(select_result()));
        let state = state_with(service, CacheConfig { enabled: false, ..Default::default() });

        let err = clear_impl(&state, CacheClearParams {}).await.unwrap_err();
        assert_eq!(err.code.0, -32007);
    }
}
