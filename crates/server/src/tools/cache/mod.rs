//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and managing the query result cache.

pub mod clear;
pub mod invalidate;
pub mod stats;

pub use clear::{CacheClearParams, clear_impl};
pub use invalidate::{CacheInvalidateParams, invalidate_impl};
pub use stats::{CacheStatsParams, stats_impl};
