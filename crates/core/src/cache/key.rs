//! Content-addressed cache key generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ResultFormat;

/// Everything that changes the result of a query.
///
/// Two fingerprints that differ only in whitespace inside the query text map
/// to the same key.
#[derive(Debug, Clone, Copy)]
pub struct QueryFingerprint<'a> {
    pub query: &'a str,
    pub endpoint: &'a str,
    pub format: ResultFormat,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Hex-encoded SHA-256 fingerprint identifying one cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Compute the key for a query and its output parameters.
    pub fn for_query(fp: &QueryFingerprint<'_>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize_query(fp.query).as_bytes());
        hasher.update(b"\n");
        hasher.update(fp.endpoint.as_bytes());
        hasher.update(b"\n");
        hasher.update(fp.format.as_str().as_bytes());
        hasher.update(b"\n");
        hasher.update(fp.limit.map(|l| l.to_string()).unwrap_or_default().as_bytes());
        hasher.update(b"\n");
        hasher.update(fp.offset.map(|o| o.to_string()).unwrap_or_default().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and collapse runs of whitespace to a single space.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://data.legilux.public.lu/sparqlendpoint";

    fn fingerprint(query: &str) -> QueryFingerprint<'_> {
        QueryFingerprint { query, endpoint: ENDPOINT, format: ResultFormat::Json, limit: None, offset: None }
    }

    #[test]
    fn test_hash_stability() {
        let key1 = CacheKey::for_query(&fingerprint("SELECT ?s WHERE { ?s ?p ?o }"));
        let key2 = CacheKey::for_query(&fingerprint("SELECT ?s WHERE { ?s ?p ?o }"));
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_hash_ignores_whitespace_layout() {
        let key1 = CacheKey::for_query(&fingerprint("SELECT ?s\n  WHERE { ?s ?p ?o }"));
        let key2 = CacheKey::for_query(&fingerprint("  SELECT ?s WHERE {   ?s ?p ?o }  "));
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_hash_different_format() {
        let json = CacheKey::for_query(&fingerprint("ASK {}"));
        let tabular = CacheKey::for_query(&QueryFingerprint { format: ResultFormat::Tabular, ..fingerprint("ASK {}") });
        assert_ne!(json, tabular);
    }

    #[test]
    fn test_hash_different_pagination() {
        let page1 = CacheKey::for_query(&QueryFingerprint { limit: Some(10), offset: Some(0), ..fingerprint("q") });
        let page2 = CacheKey::for_query(&QueryFingerprint { limit: Some(10), offset: Some(10), ..fingerprint("q") });
        let swapped = CacheKey::for_query(&QueryFingerprint { limit: Some(0), offset: Some(10), ..fingerprint("q") });
        assert_ne!(page1, page2);
        assert_ne!(page2, swapped);
    }

    #[test]
    fn test_hash_different_endpoint() {
        let a = CacheKey::for_query(&fingerprint("q"));
        let b = CacheKey::for_query(&QueryFingerprint { endpoint: "https://example.org/sparql", ..fingerprint("q") });
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_format() {
        let key = CacheKey::for_query(&fingerprint("q"));
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
