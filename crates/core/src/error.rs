//! Unified error types for mcp-legilux.
//!
//! Every message carries a stable code prefix so tool callers can match on it.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the mcp-legilux server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Cache constructed with a capacity of zero.
    #[error("INVALID_CAPACITY: capacity must be greater than 0, got {0}")]
    InvalidCapacity(usize),

    /// Explicit TTL passed to `put` was zero or negative.
    #[error("INVALID_TTL: ttl must be positive, got {0}s")]
    InvalidTtl(i64),

    /// Eviction was requested from a policy that tracks no keys.
    ///
    /// Signals broken cache bookkeeping rather than bad input.
    #[error("EMPTY_POLICY: no keys tracked by eviction policy")]
    EmptyPolicy,

    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Remote query execution failed.
    #[error("QUERY_FAILED: {0}")]
    QueryFailed(String),

    /// SPARQL endpoint could not be found.
    #[error("ENDPOINT_NOT_FOUND: {0}")]
    EndpointNotFound(String),

    /// Endpoint rejected the query as malformed.
    #[error("MALFORMED_QUERY: {0}")]
    MalformedQuery(String),

    /// Remote query timed out.
    #[error("QUERY_TIMEOUT: {0}")]
    QueryTimeout(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Caching is turned off in configuration.
    #[error("CACHE_DISABLED")]
    CacheDisabled,
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidTtl(_) => (-32602, err.to_string()),
            Error::InvalidCapacity(_) => (-32602, err.to_string()),
            Error::QueryFailed(msg) => (-32000, msg.clone()),
            Error::EmptyPolicy => (-32001, err.to_string()),
            Error::EndpointNotFound(msg) => (-32003, msg.clone()),
            Error::MalformedQuery(msg) => (-32004, msg.clone()),
            Error::QueryTimeout(msg) => (-32005, msg.clone()),
            Error::HttpError(msg) => (-32006, msg.clone()),
            Error::CacheDisabled => (-32007, "Query cache is disabled".to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
