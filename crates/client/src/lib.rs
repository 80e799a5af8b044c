//! Client code for mcp-legilux.
//!
//! This crate provides the SPARQL endpoint client and the result formatters
//! used by the server.

pub mod format;
pub mod sparql;

pub use format::{FormatOptions, ResultShape, format_results};
pub use sparql::{QueryService, SparqlClient, SparqlConfig, SparqlError, SparqlRequest};
