//! mcp-legilux server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use legilux_client::{SparqlClient, SparqlConfig};
use legilux_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!(endpoint = %config.endpoint_url, "Starting mcp-legilux server on stdio transport");

    let client = SparqlClient::new(SparqlConfig::from(&config))?;
    let state = Arc::new(state::AppState::new(config, Arc::new(client))?);

    let sweeper = match (&state.cache, state.config.cache.sweep_interval()) {
        (Some(cache), Some(every)) => Some(state::spawn_sweeper(Arc::clone(cache), every)),
        _ => None,
    };

    let handler = handler::LegiluxServer::new(Arc::clone(&state));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    if let Some(cache) = &state.cache {
        let stats = cache.stats();
        tracing::info!(
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            expirations = stats.expirations,
            "Shutting down"
        );
    }

    Ok(())
}
