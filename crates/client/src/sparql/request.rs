//! SPARQL request types and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::SparqlError;

/// Longest query text accepted, in characters.
pub const MAX_QUERY_CHARS: usize = 20_000;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 10_000;

static LIMIT_CLAUSE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\s+\d+"));

/// A query plus optional paging applied on top of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlRequest {
    /// SPARQL query text.
    pub query: String,

    /// Row limit appended when the query has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Row offset appended alongside the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl SparqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Default::default() }
    }

    /// Validate the request parameters.
    ///
    /// Returns an error if the query is blank or oversized, or the limit is out of range.
    pub fn validate(&self) -> Result<(), SparqlError> {
        if self.query.trim().is_empty() {
            return Err(SparqlError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.query.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(SparqlError::InvalidQuery(format!(
                "query too long: {} chars (max {})",
                chars, MAX_QUERY_CHARS
            )));
        }

        if let Some(limit) = self.limit
            && !(1..=MAX_LIMIT).contains(&limit)
        {
            return Err(SparqlError::InvalidQuery(format!("limit must be 1-{MAX_LIMIT}, got {limit}")));
        }

        Ok(())
    }

    /// Whether the query text already carries its own `LIMIT` clause.
    pub fn has_limit_clause(&self) -> bool {
        match LIMIT_CLAUSE.as_ref() {
            Ok(re) => re.is_match(&self.query),
            Err(_) => self.query.to_ascii_uppercase().contains("LIMIT"),
        }
    }

    /// Query text actually sent to the endpoint.
    ///
    /// Paging is appended only when the query has no `LIMIT` of its own; an
    /// offset without a limit is appended on its own.
    pub fn effective_query(&self) -> String {
        if self.has_limit_clause() || (self.limit.is_none() && self.offset.is_none()) {
            return self.query.clone();
        }

        let mut query = self.query.trim_end().to_string();
        if let Some(limit) = self.limit {
            query.push_str(&format!("\nLIMIT {limit}"));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            query.push_str(&format!("\nOFFSET {offset}"));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_query() {
        let req = SparqlRequest::new("   ");
        assert!(matches!(req.validate(), Err(SparqlError::InvalidQuery(_))));
    }

    #[test]
    fn test_validate_query_too_long() {
        let req = SparqlRequest::new("x".repeat(MAX_QUERY_CHARS + 1));
        assert!(matches!(req.validate(), Err(SparqlError::InvalidQuery(msg)) if msg.contains("too long")));

        let req = SparqlRequest::new("x".repeat(MAX_QUERY_CHARS));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_limit_range() {
        let req = SparqlRequest { limit: Some(0), ..SparqlRequest::new("ASK {}") };
        assert!(req.validate().is_err());

        let req = SparqlRequest { limit: Some(MAX_LIMIT + 1), ..SparqlRequest::new("ASK {}") };
        assert!(req.validate().is_err());

        let req = SparqlRequest { limit: Some(MAX_LIMIT), offset: Some(40), ..SparqlRequest::new("ASK {}") };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_effective_query_appends_paging() {
        let req = SparqlRequest {
            limit: Some(10),
            offset: Some(20),
            ..SparqlRequest::new("SELECT ?s WHERE { ?s ?p ?o }  ")
        };
        assert_eq!(req.effective_query(), "SELECT ?s WHERE { ?s ?p ?o }\nLIMIT 10\nOFFSET 20");
    }

    #[test]
    fn test_effective_query_skips_zero_offset() {
        let req = SparqlRequest { limit: Some(5), offset: Some(0), ..SparqlRequest::new("SELECT ?s WHERE { ?s ?p ?o }") };
        assert_eq!(req.effective_query(), "SELECT ?s WHERE { ?s ?p ?o }\nLIMIT 5");
    }

    #[test]
    fn test_effective_query_keeps_existing_limit() {
        let req = SparqlRequest { limit: Some(10), ..SparqlRequest::new("SELECT ?s WHERE { ?s ?p ?o } limit 3") };
        assert!(req.has_limit_clause());
        assert_eq!(req.effective_query(), "SELECT ?s WHERE { ?s ?p ?o } limit 3");
    }

    #[test]
    fn test_effective_query_without_paging() {
        let req = SparqlRequest::new("ASK { ?s ?p ?o }");
        assert_eq!(req.effective_query(), "ASK { ?s ?p ?o }");
    }
}
