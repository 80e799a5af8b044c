//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-legilux server.

pub mod cache;
pub mod sparql_query;

pub use sparql_query::{SparqlQueryParams, query_impl};
