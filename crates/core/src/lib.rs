//! Core types and shared functionality for mcp-legilux.
//!
//! This crate provides:
//! - In-memory query result cache with pluggable eviction (LRU, LFU, FIFO)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod format;

pub use cache::{CacheKey, CacheStats, EvictionPolicy, KeyedLocks, PolicyKind, QueryCache};
pub use config::{AppConfig, CacheConfig};
pub use error::Error;
pub use format::ResultFormat;
