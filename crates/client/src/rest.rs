//! Cursor-paginated fetcher over a REST list endpoint.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::query::{FetchPage, Page};
use crate::transport::HttpTransport;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fetches pages of `T` from one list endpoint with a fixed parameter set.
///
/// The cursor comes back from the previous page; the first page is fetched
/// without one.
pub struct RestPageFetcher<T> {
    transport: HttpTransport,
    path: String,
    base_query: Vec<(String, String)>,
    page_size: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestPageFetcher<T> {
    /// Create a fetcher for `path` with the query's filter/sort parameters.
    #[must_use]
    pub fn new(
        transport: HttpTransport,
        path: impl Into<String>,
        base_query: Vec<(String, String)>,
        page_size: u32,
    ) -> Self {
        Self {
            transport,
            path: path.into(),
            base_query,
            page_size,
            _marker: PhantomData,
        }
    }
}

impl<T> FetchPage<T> for RestPageFetcher<T>
where
    T: DeserializeOwned + Send + Sync,
{
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<T>, ApiError> {
        let mut query = self.base_query.clone();
        query.push(("limit".to_string(), self.page_size.to_string()));
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }
        self.transport.get_json(&self.path, &query).await
    }
}
