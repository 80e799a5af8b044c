//! SPARQL client error types.

use std::sync::Arc;

use legilux_core::Error;

/// Errors from the SPARQL endpoint client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SparqlError {
    /// Query rejected before it was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Endpoint answered 404.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Endpoint answered 400, usually a syntax error in the query.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// Any other non-success HTTP status.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not SPARQL JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SparqlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SparqlError::Timeout } else { SparqlError::Network(Arc::new(err)) }
    }
}

impl From<SparqlError> for Error {
    fn from(err: SparqlError) -> Self {
        match err {
            SparqlError::InvalidQuery(msg) => Error::InvalidInput(msg),
            SparqlError::EndpointNotFound(msg) => Error::EndpointNotFound(msg),
            SparqlError::MalformedQuery(msg) => Error::MalformedQuery(msg),
            SparqlError::HttpError { status } => Error::HttpError(format!("status {status}")),
            SparqlError::Timeout => Error::QueryTimeout("SPARQL endpoint did not answer in time".into()),
            err @ (SparqlError::Network(_) | SparqlError::Parse(_)) => Error::QueryFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SparqlError::InvalidQuery("empty".to_string());
        assert!(err.to_string().contains("invalid query"));

        let err = SparqlError::HttpError { status: 503 };
        assert_eq!(err.to_string(), "HTTP error: 503");
    }

    #[test]
    fn test_into_core_error() {
        assert!(matches!(Error::from(SparqlError::InvalidQuery("x".into())), Error::InvalidInput(_)));
        assert!(matches!(Error::from(SparqlError::EndpointNotFound("x".into())), Error::EndpointNotFound(_)));
        assert!(matches!(Error::from(SparqlError::MalformedQuery("x".into())), Error::MalformedQuery(_)));
        assert!(matches!(Error::from(SparqlError::Timeout), Error::QueryTimeout(_)));
        assert_eq!(Error::from(SparqlError::HttpError { status: 502 }), Error::HttpError("status 502".into()));

        let err = Error::from(SparqlError::Parse("expected value".into()));
        assert_eq!(err, Error::QueryFailed("parse error: expected value".into()));
    }
}
