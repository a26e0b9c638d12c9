//! Process-wide store of shared query sessions.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use super::infinite::{FetchPage, InfiniteQuery, Keyed};
use super::key::QueryKey;

/// Default staleness window for cached query results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of concurrently cached query sessions per store.
pub const DEFAULT_CAPACITY: u64 = 1000;

/// Shared cache of [`InfiniteQuery`] sessions for one entity scope.
///
/// Two lookups with value-equal keys return the same session instance, so
/// every component rendering the same logical query shares one sequence.
/// Entries expire after a bounded TTL (staleness window) and are dropped
/// eagerly when a mutation invalidates the scope.
///
/// Components only read sessions out of the store; the fetch/mutation layer
/// is the only writer.
pub struct QueryStore<T, F> {
    cache: Cache<QueryKey, Arc<InfiniteQuery<T, F>>>,
}

impl<T, F> QueryStore<T, F>
where
    T: Keyed + Clone + Send + Sync + 'static,
    F: FetchPage<T> + 'static,
{
    /// Create a store with the default TTL and capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Create a store with an explicit capacity and staleness window.
    #[must_use]
    pub fn with_policy(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Get the shared session for `key`, creating it on first use.
    ///
    /// `make_fetcher` is only called when no live session exists for the
    /// key.
    pub async fn get_or_insert(
        &self,
        key: QueryKey,
        make_fetcher: impl FnOnce() -> F,
    ) -> Arc<InfiniteQuery<T, F>> {
        self.cache
            .get_with(key, async { Arc::new(InfiniteQuery::new(make_fetcher())) })
            .await
    }

    /// Drop every cached session in this store.
    ///
    /// Called by the mutation layer after any create/update/delete of the
    /// underlying entity, before the mutation is reported complete.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Drop cached sessions whose key's textual form starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        // The predicate registry only errors when invalidation closures are
        // disabled, which `with_policy` always enables.
        let _ = self
            .cache
            .invalidate_entries_if(move |key, _| key.as_string().starts_with(&prefix));
        self.cache.run_pending_tasks().await;
    }

    /// Number of live cached sessions (for tests and diagnostics).
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Whether the store holds no live sessions.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T, F> Default for QueryStore<T, F>
where
    T: Keyed + Clone + Send + Sync + 'static,
    F: FetchPage<T> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::infinite::Page;
    use super::*;
    use crate::error::ApiError;

    #[derive(Debug, Clone)]
    struct Row {
        id: i32,
    }

    impl Keyed for Row {
        fn item_key(&self) -> String {
            self.id.to_string()
        }
    }

    struct StaticFetcher;

    impl FetchPage<Row> for StaticFetcher {
        async fn fetch_page(&self, _cursor: Option<&str>) -> Result<Page<Row>, ApiError> {
            Ok(Page {
                items: vec![Row { id: 1 }],
                next_cursor: None,
                total: Some(1),
            })
        }
    }

    #[tokio::test]
    async fn test_value_equal_keys_share_one_session() {
        let store: QueryStore<Row, StaticFetcher> = QueryStore::new();

        let a = QueryKey::new("products").with("q", "chair").with("sort", "name");
        let b = QueryKey::new("products").with("sort", "name").with("q", "chair");

        let first = store.get_or_insert(a, || StaticFetcher).await;
        let second = store.get_or_insert(b, || StaticFetcher).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_different_params_start_fresh_sessions() {
        let store: QueryStore<Row, StaticFetcher> = QueryStore::new();

        let first = store
            .get_or_insert(QueryKey::new("products").with("q", "chair"), || StaticFetcher)
            .await;
        let second = store
            .get_or_insert(QueryKey::new("products").with("q", "table"), || StaticFetcher)
            .await;

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_store() {
        let store: QueryStore<Row, StaticFetcher> = QueryStore::new();
        store
            .get_or_insert(QueryKey::new("products"), || StaticFetcher)
            .await;

        store.invalidate_all().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_prefix_is_selective() {
        let store: QueryStore<Row, StaticFetcher> = QueryStore::new();
        store
            .get_or_insert(QueryKey::new("products").with("category", 1), || StaticFetcher)
            .await;
        store
            .get_or_insert(QueryKey::new("products").with("category", 2), || StaticFetcher)
            .await;

        store.invalidate_prefix("products;category=1").await;
        assert_eq!(store.len().await, 1);
    }
}
