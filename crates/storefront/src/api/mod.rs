//! Catalog API client.
//!
//! Wraps the public REST endpoints with two layers of caching:
//!
//! - detail records go through a `moka` cache with a 5-minute TTL;
//! - list queries go through shared [`QueryStore`]s, so every surface
//!   rendering the same filter set shares one growing sequence.

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use arenda_client::rest::DEFAULT_PAGE_SIZE;
use arenda_client::{ApiError, HttpTransport, InfiniteQuery, QueryKey, QueryStore, RestPageFetcher};
use arenda_core::{ProductGroupId, ProductId};

use crate::config::StorefrontConfig;
use crate::orders::{OrderListParams, OrderSummary};

use cache::{CacheKey, CacheValue};
pub use types::{
    CatalogImage, CatalogProduct, GroupListParams, ProductGroup, ProductListParams, ProductSort,
};

const DETAIL_TTL: Duration = Duration::from_secs(300);
const DETAIL_CAPACITY: u64 = 1000;

type ProductQueries = QueryStore<CatalogProduct, RestPageFetcher<CatalogProduct>>;
type GroupQueries = QueryStore<ProductGroup, RestPageFetcher<ProductGroup>>;
type OrderQueries = QueryStore<OrderSummary, RestPageFetcher<OrderSummary>>;

/// Client for the public catalog API.
///
/// Cheap to clone; all clones share the same caches.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    transport: HttpTransport,
    details: Cache<CacheKey, CacheValue>,
    products: ProductQueries,
    groups: GroupQueries,
    orders: OrderQueries,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let details = Cache::builder()
            .max_capacity(DETAIL_CAPACITY)
            .time_to_live(DETAIL_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                transport: HttpTransport::new(
                    config.api_base_url.clone(),
                    config.public_token.clone(),
                ),
                details,
                products: QueryStore::new(),
                groups: QueryStore::new(),
                orders: QueryStore::new(),
            }),
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by id, with related/similar products expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request
    /// fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, ApiError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.details.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: CatalogProduct = self
            .inner
            .transport
            .get_json(
                &format!("products/{id}"),
                &[("expand".to_string(), "related".to_string())],
            )
            .await?;

        self.inner
            .details
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Shared paginated query over the product list for `params`.
    ///
    /// Structurally equal parameter sets return the same query session.
    pub async fn products(
        &self,
        params: &ProductListParams,
    ) -> Arc<InfiniteQuery<CatalogProduct, RestPageFetcher<CatalogProduct>>> {
        let mut key = QueryKey::new("products")
            .with("q", params.search.clone())
            .with("sort", params.sort.as_str());
        if let Some(category) = params.category {
            key = key.with("category", category);
        }
        if let Some(color) = params.color {
            key = key.with("color", color);
        }
        if params.new_arrivals {
            key = key.with("new_arrivals", "true");
        }

        let transport = self.inner.transport.clone();
        let query = params.to_query();
        self.inner
            .products
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "products", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    /// Products flagged for the new-arrivals block.
    pub async fn new_arrivals(
        &self,
    ) -> Arc<InfiniteQuery<CatalogProduct, RestPageFetcher<CatalogProduct>>> {
        self.products(&ProductListParams {
            new_arrivals: true,
            ..ProductListParams::default()
        })
        .await
    }

    // =========================================================================
    // Product Group Methods
    // =========================================================================

    /// Get a product group by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is not found or the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product_group(&self, id: ProductGroupId) -> Result<ProductGroup, ApiError> {
        let cache_key = CacheKey::Group(id);

        if let Some(CacheValue::Group(group)) = self.inner.details.get(&cache_key).await {
            debug!("Cache hit for product group");
            return Ok(*group);
        }

        let group: ProductGroup = self
            .inner
            .transport
            .get_json(&format!("product-groups/{id}"), &[])
            .await?;

        self.inner
            .details
            .insert(cache_key, CacheValue::Group(Box::new(group.clone())))
            .await;

        Ok(group)
    }

    /// Shared paginated query over the product-group list.
    pub async fn product_groups(
        &self,
        params: &GroupListParams,
    ) -> Arc<InfiniteQuery<ProductGroup, RestPageFetcher<ProductGroup>>> {
        let mut key = QueryKey::new("product-groups").with("q", params.search.clone());
        if let Some(category) = params.category {
            key = key.with("category", category);
        }

        let transport = self.inner.transport.clone();
        let query = params.to_query();
        self.inner
            .groups
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "product-groups", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    // =========================================================================
    // Order History
    // =========================================================================

    /// Shared paginated query over the customer's order history.
    ///
    /// Requires an authenticated transport; without a token the backend
    /// rejects the request.
    pub async fn my_orders(
        &self,
        params: &OrderListParams,
    ) -> Arc<InfiniteQuery<OrderSummary, RestPageFetcher<OrderSummary>>> {
        let mut key = QueryKey::new("my-orders");
        if let Some(status) = params.status {
            key = key.with("status", status.as_str());
        }

        let transport = self.inner.transport.clone();
        let query = params.to_query();
        self.inner
            .orders
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "my/orders", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product detail.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.details.invalidate(&CacheKey::Product(id)).await;
    }

    /// Invalidate every cached product list query.
    pub async fn invalidate_products(&self) {
        self.inner.products.invalidate_all().await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.details.invalidate_all();
        self.inner.details.run_pending_tasks().await;
        self.inner.products.invalidate_all().await;
        self.inner.groups.invalidate_all().await;
        self.inner.orders.invalidate_all().await;
    }
}
