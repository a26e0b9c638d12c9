//! A query whose results accumulate across successive page fetches.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;

/// One server-returned page of records.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Records in this page.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` means this was the last page.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Total number of records matching the query, when the backend reports
    /// it.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Items that carry a stable identity, used to de-duplicate entries that
/// appear in more than one page of the same query session.
pub trait Keyed {
    /// Stable identity of this item within its entity scope.
    fn item_key(&self) -> String;
}

/// The seam between the query cache and the network: fetches one page for a
/// fixed parameter set.
pub trait FetchPage<T>: Send + Sync {
    /// Fetch the page at `cursor` (`None` for the first page).
    fn fetch_page(
        &self,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<T>, ApiError>> + Send;
}

/// Result of a [`InfiniteQuery::fetch_next_page`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched; `usize` is the number of new (non-duplicate)
    /// items appended.
    Appended(usize),
    /// Another caller was already fetching this page; its result was joined
    /// and no second request was issued.
    Joined,
    /// There is no further page; no request was issued.
    Exhausted,
}

/// Point-in-time view of a query's accumulated state.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
    /// All items fetched so far, in page order.
    pub items: Vec<T>,
    /// Number of pages fetched so far.
    pub pages_fetched: usize,
    /// Backend-reported total, if known.
    pub total: Option<u64>,
    /// Whether the last page has been reached.
    pub exhausted: bool,
    /// Message of the most recent failed page fetch, cleared on success.
    pub error: Option<String>,
    /// Whether a page fetch is currently in flight.
    pub fetching: bool,
}

struct QueryState<T> {
    items: Vec<T>,
    seen: HashSet<String>,
    next_cursor: Option<String>,
    pages_fetched: usize,
    total: Option<u64>,
    exhausted: bool,
    last_error: Option<String>,
}

impl<T> QueryState<T> {
    fn fresh() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            next_cursor: None,
            pages_fetched: 0,
            total: None,
            exhausted: false,
            last_error: None,
        }
    }
}

/// A growing, de-duplicated sequence of records for one logical query.
///
/// Pages are fetched strictly in order: a fetch gate serializes page
/// requests, so out-of-order completion cannot corrupt the sequence, and a
/// second `fetch_next_page` call issued while one is outstanding joins the
/// in-flight request instead of duplicating it.
///
/// A failed page fetch keeps every previously fetched page; retrying
/// re-issues only the failed page, because the cursor only advances on
/// success.
pub struct InfiniteQuery<T, F> {
    fetcher: F,
    state: Mutex<QueryState<T>>,
    gate: tokio::sync::Mutex<()>,
}

impl<T, F> InfiniteQuery<T, F>
where
    T: Keyed + Clone,
    F: FetchPage<T>,
{
    /// Create an empty query session over `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: Mutex::new(QueryState::fresh()),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, QueryState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a page fetch is currently in flight.
    pub fn is_fetching(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Snapshot the accumulated state for rendering.
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        let fetching = self.is_fetching();
        let state = self.state();
        QuerySnapshot {
            items: state.items.clone(),
            pages_fetched: state.pages_fetched,
            total: state.total,
            exhausted: state.exhausted,
            error: state.last_error.clone(),
            fetching,
        }
    }

    /// Fetch the next page and append it to the sequence.
    ///
    /// No-op (and no request) when the query is exhausted. Joins an
    /// in-flight request for the same page instead of duplicating it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; previously fetched pages are kept and the
    /// next call retries the same page.
    pub async fn fetch_next_page(&self) -> Result<FetchOutcome, ApiError> {
        let observed_pages = {
            let state = self.state();
            if state.exhausted {
                return Ok(FetchOutcome::Exhausted);
            }
            state.pages_fetched
        };

        let _gate = self.gate.lock().await;

        // Re-check under the gate: another caller may have fetched our page
        // (join) or reached the end while we waited.
        let cursor = {
            let state = self.state();
            if state.pages_fetched != observed_pages {
                debug!("joined in-flight page fetch");
                return Ok(FetchOutcome::Joined);
            }
            if state.exhausted {
                return Ok(FetchOutcome::Exhausted);
            }
            state.next_cursor.clone()
        };

        match self.fetcher.fetch_page(cursor.as_deref()).await {
            Ok(page) => Ok(FetchOutcome::Appended(self.apply_page(page))),
            Err(e) => {
                self.state().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Discard the accumulated sequence and fetch the first page again.
    ///
    /// Used after a mutation invalidates this query.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the sequence is left empty in that case.
    pub async fn refetch(&self) -> Result<usize, ApiError> {
        let _gate = self.gate.lock().await;
        *self.state() = QueryState::fresh();

        match self.fetcher.fetch_page(None).await {
            Ok(page) => Ok(self.apply_page(page)),
            Err(e) => {
                self.state().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn apply_page(&self, page: Page<T>) -> usize {
        let mut state = self.state();
        let mut appended = 0;
        for item in page.items {
            if state.seen.insert(item.item_key()) {
                state.items.push(item);
                appended += 1;
            }
        }
        state.pages_fetched += 1;
        state.exhausted = page.next_cursor.is_none();
        state.next_cursor = page.next_cursor;
        if page.total.is_some() {
            state.total = page.total;
        }
        state.last_error = None;
        appended
    }
}
