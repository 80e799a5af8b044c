//! Process-scoped server state.
//!
//! Built once in `main` from `AppConfig` and shared with the handler behind
//! an `Arc`. Dropping it drops the cache.

use std::sync::Arc;
use std::time::Duration;

use legilux_client::{FormatOptions, QueryService};
use legilux_core::{AppConfig, CacheKey, Error, KeyedLocks, QueryCache};
use serde_json::Value;
use tokio::task::JoinHandle;

/// Cache of formatted query results.
pub type ResultCache = QueryCache<CacheKey, Arc<Value>>;

/// Everything a tool call needs.
pub struct AppState {
    pub config: AppConfig,
    /// `None` when caching is disabled.
    pub cache: Option<Arc<ResultCache>>,
    pub locks: KeyedLocks<CacheKey>,
    pub service: Arc<dyn QueryService>,
}

impl AppState {
    /// Build state from configuration, constructing the cache if enabled.
    pub fn new(config: AppConfig, service: Arc<dyn QueryService>) -> Result<Self, Error> {
        let cache = if config.cache.enabled {
            let cache = ResultCache::from_config(&config.cache)?;
            tracing::info!(
                capacity = cache.capacity(),
                policy = %cache.policy_kind(),
                default_ttl_secs = ?config.cache.default_ttl_secs,
                "Query cache enabled"
            );
            Some(Arc::new(cache))
        } else {
            None
        };

        Ok(Self { config, cache, locks: KeyedLocks::new(), service })
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions { include_metadata: self.config.include_metadata }
    }

    /// The cache, or `CacheDisabled` when caching is off.
    pub fn require_cache(&self) -> Result<&ResultCache, Error> {
        self.cache.as_deref().ok_or(Error::CacheDisabled)
    }
}

/// Spawn a task that purges expired entries every `every`.
pub fn spawn_sweeper(cache: Arc<ResultCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, remaining = cache.len(), "Swept expired cache entries");
            }
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use legilux_client::SparqlError;
    use legilux_core::CacheConfig;
    use legilux_core::cache::ManualClock;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const TEST_ENDPOINT: &str = "http://localhost:8890/sparql";

    /// In-process `QueryService` returning canned results and counting calls.
    pub struct StubService {
        pub calls: AtomicUsize,
        pub queries: Mutex<Vec<String>>,
        response: Result<Value, SparqlError>,
        delay: Duration,
    }

    impl StubService {
        pub fn ok(value: Value) -> Self {
            Self { calls: AtomicUsize::new(0), queries: Mutex::new(Vec::new()), response: Ok(value), delay: Duration::ZERO }
        }

        pub fn failing(err: SparqlError) -> Self {
            Self { response: Err(err), ..Self::ok(Value::Null) }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QueryService for StubService {
        fn endpoint(&self) -> &str {
            TEST_ENDPOINT
        }

        async fn execute(&self, query: &str) -> Result<Value, SparqlError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.response.clone()
        }
    }

    pub fn select_result() -> Value {
        serde_json::json!({
            "head": { "vars": ["act"] },
            "results": { "bindings": [
                { "act": { "type": "uri", "value": "http://data.legilux.public.lu/eli/etat/leg/loi/2020/01/01/a1" } }
            ] }
        })
    }

    pub fn state_with(service: Arc<StubService>, cache: CacheConfig) -> AppState {
        let config = AppConfig { endpoint_url: TEST_ENDPOINT.into(), cache, ..Default::default() };
        AppState::new(config, service).unwrap()
    }

    #[test]
    fn test_state_disabled_cache() {
        let service = Arc::new(StubService::ok(select_result()));
        let state = state_with(service, CacheConfig { enabled: false, ..Default::default() });
        assert!(state.cache.is_none());
        assert!(matches!(state.require_cache(), Err(Error::CacheDisabled)));
    }

    #[test]
    fn test_state_builds_cache_from_config() {
        let service = Arc::new(StubService::ok(select_result()));
        let state = state_with(service, CacheConfig { capacity: 3, ..Default::default() });
        let cache = state.require_cache().unwrap();
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.default_ttl(), Some(chrono::Duration::seconds(300)));
    }

    #[tokio::test]
    async fn test_sweeper_purges_expired_entries() {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(ResultCache::new(4, Default::default()).unwrap().with_clock(clock.clone()));
        let key = CacheKey::for_query(&legilux_core::cache::QueryFingerprint {
            query: "ASK {}",
            endpoint: TEST_ENDPOINT,
            format: Default::default(),
            limit: None,
            offset: None,
        });
        cache.put(key, Arc::new(Value::Bool(true)), Some(chrono::Duration::seconds(1))).unwrap();
        clock.advance(chrono::Duration::seconds(2));

        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
        assert_eq!(cache.stats().misses, 0);
    }
}
