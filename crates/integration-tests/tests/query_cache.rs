//! Infinite query sessions driven the way a scrolling list drives them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arenda_client::{
    ApiError, FetchPage, InfiniteQuery, Keyed, Page, QueryKey, QueryStore, ScrollTrigger,
};
use arenda_integration_tests::init_tracing;

#[derive(Debug, Clone)]
struct Row {
    id: i32,
}

impl Keyed for Row {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Serves `total` rows in pages of `page_size`, counting requests through a
/// shared counter.
struct PagedFetcher {
    total: i32,
    page_size: i32,
    requests: Arc<AtomicUsize>,
}

impl PagedFetcher {
    fn new(total: i32, page_size: i32) -> Self {
        Self {
            total,
            page_size,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl FetchPage<Row> for PagedFetcher {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Row>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let start: i32 = cursor.map_or(Ok(0), str::parse).expect("numeric cursor");
        let end = (start + self.page_size).min(self.total);
        let items = (start..end).map(|id| Row { id }).collect();
        let next_cursor = (end < self.total).then(|| end.to_string());
        Ok(Page {
            items,
            next_cursor,
            total: Some(u64::try_from(self.total).expect("total")),
        })
    }
}

/// Drive the query the way the scroll sentinel does: fire on entering the
/// viewport, then keep draining pages while it stays visible.
async fn scroll_to_bottom(query: &InfiniteQuery<Row, PagedFetcher>) {
    let mut trigger = ScrollTrigger::new();
    let snapshot = query.snapshot();
    let mut fire = trigger.on_visibility(true, snapshot.fetching, snapshot.exhausted);
    while fire {
        query.fetch_next_page().await.expect("fetch");
        fire = trigger.on_fetch_complete(query.snapshot().exhausted);
    }
}

#[tokio::test]
async fn test_scrolling_drains_every_page_in_order() {
    init_tracing();
    let query = InfiniteQuery::new(PagedFetcher::new(5, 2));
    scroll_to_bottom(&query).await;

    let snapshot = query.snapshot();
    assert!(snapshot.exhausted);
    assert_eq!(snapshot.pages_fetched, 3);
    assert_eq!(snapshot.total, Some(5));
    let ids: Vec<i32> = snapshot.items.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_exhausted_list_stops_requesting() {
    init_tracing();
    let fetcher = PagedFetcher::new(2, 2);
    let requests = Arc::clone(&fetcher.requests);
    let query = InfiniteQuery::new(fetcher);
    scroll_to_bottom(&query).await;
    let requests_after_drain = requests.load(Ordering::SeqCst);

    // Re-entering the viewport on an exhausted list must not refetch.
    let mut trigger = ScrollTrigger::new();
    let snapshot = query.snapshot();
    assert!(!trigger.on_visibility(true, snapshot.fetching, snapshot.exhausted));
    assert_eq!(requests.load(Ordering::SeqCst), requests_after_drain);
}

#[tokio::test]
async fn test_store_shares_sessions_across_surfaces() {
    init_tracing();
    let store: QueryStore<Row, PagedFetcher> = QueryStore::new();

    let list_view = store
        .get_or_insert(QueryKey::new("products").with("category", 3), || {
            PagedFetcher::new(4, 2)
        })
        .await;
    list_view.fetch_next_page().await.expect("fetch");

    // Another surface opens the same filter set and sees the loaded page.
    let picker = store
        .get_or_insert(QueryKey::new("products").with("category", 3), || {
            PagedFetcher::new(4, 2)
        })
        .await;
    assert!(Arc::ptr_eq(&list_view, &picker));
    assert_eq!(picker.snapshot().items.len(), 2);

    // A mutation invalidates the scope; the next lookup starts fresh.
    store.invalidate_prefix("products").await;
    let fresh = store
        .get_or_insert(QueryKey::new("products").with("category", 3), || {
            PagedFetcher::new(4, 2)
        })
        .await;
    assert!(!Arc::ptr_eq(&list_view, &fresh));
    assert!(fresh.snapshot().items.is_empty());
}
