//! SPARQL endpoint client.
//!
//! Runs queries against a remote SPARQL 1.1 endpoint and returns the decoded
//! `application/sparql-results+json` document.
//!
//! ### Protocol
//!
//! - **Method**: `POST` with a form-encoded `query` parameter.
//! - **Accept**: `application/sparql-results+json`.
//! - **Status mapping**: 404 is `EndpointNotFound`, 400 is `MalformedQuery`,
//!   any other non-success status is `HttpError`.

pub mod error;
pub mod request;

pub use error::SparqlError;
pub use request::{MAX_LIMIT, MAX_QUERY_CHARS, SparqlRequest};

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use legilux_core::AppConfig;
use reqwest::header;
use serde_json::Value;

/// Default SPARQL endpoint.
const DEFAULT_ENDPOINT: &str = "https://data.legilux.public.lu/sparqlendpoint";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "mcp-legilux/0.1";

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Something that can answer a SPARQL query with a JSON result document.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Endpoint identity, folded into cache keys.
    fn endpoint(&self) -> &str;

    /// Execute `query` and return the raw result document.
    async fn execute(&self, query: &str) -> Result<Value, SparqlError>;
}

/// SPARQL client configuration.
#[derive(Debug, Clone)]
pub struct SparqlConfig {
    /// Endpoint URL.
    pub endpoint_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: mcp-legilux/0.x).
    pub user_agent: String,
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for SparqlConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint_url: config.endpoint_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client for a single SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    http: reqwest::Client,
    config: SparqlConfig,
}

impl SparqlClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SparqlConfig) -> Result<Self, SparqlError> {
        url::Url::parse(&config.endpoint_url)
            .map_err(|e| SparqlError::InvalidQuery(format!("invalid endpoint URL: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| SparqlError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SparqlConfig {
        &self.config
    }
}

#[async_trait]
impl QueryService for SparqlClient {
    fn endpoint(&self) -> &str {
        &self.config.endpoint_url
    }

    async fn execute(&self, query: &str) -> Result<Value, SparqlError> {
        if query.trim().is_empty() {
            return Err(SparqlError::InvalidQuery("query cannot be empty".to_string()));
        }

        let start = Instant::now();
        tracing::debug!(endpoint = %self.config.endpoint_url, chars = query.len(), "executing SPARQL query");

        let http_response = self
            .http
            .post(&self.config.endpoint_url)
            .header(header::ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("SPARQL endpoint response status: {}", status);

        if status == 404 {
            return Err(SparqlError::EndpointNotFound(self.config.endpoint_url.clone()));
        }

        if status == 400 {
            let body = http_response.text().await.unwrap_or_default();
            let detail = body.trim();
            return Err(SparqlError::MalformedQuery(if detail.is_empty() {
                "endpoint rejected the query".to_string()
            } else {
                detail.chars().take(500).collect()
            }));
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(SparqlError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| SparqlError::Parse(e.to_string()))?;

        if !value.is_object() {
            return Err(SparqlError::Parse("expected a JSON object".to_string()));
        }

        tracing::debug!("SPARQL query completed in {:?}", start.elapsed());

        Ok(value)
    }
}
