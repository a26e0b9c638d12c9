//! Admin REST client.
//!
//! Mutations are never cached. List reads go through shared [`QueryStore`]s
//! like the storefront, and every mutation drops the affected stores before
//! it is reported complete, so the next render refetches fresh data.
//!
//! The write surface that the form and stock layers depend on is the
//! [`AdminApi`] trait; [`AdminClient`] is its production implementation.

pub mod types;

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use arenda_client::rest::DEFAULT_PAGE_SIZE;
use arenda_client::{ApiError, HttpTransport, InfiniteQuery, QueryKey, QueryStore, RestPageFetcher};
use arenda_core::{
    CategoryId, CustomerId, ImageId, OrderId, OrderStatus, ProductGroupId, ProductId,
};

use crate::config::AdminConfig;

pub use types::{
    AdminOrder, AdminOrderLine, AdminProduct, Customer, CustomerInput, DeliveryAttrs, Dimensions,
    ImagePlacement, ImageUpload, ProductGroup, ProductGroupInput, ProductImage, ProductInput,
    ProductSummary, Seo, SetupAttrs, StockTransaction, StockTransactionInput, Visibility,
};

type ProductQueries = QueryStore<ProductSummary, RestPageFetcher<ProductSummary>>;
type GroupQueries = QueryStore<ProductGroup, RestPageFetcher<ProductGroup>>;
type CustomerQueries = QueryStore<Customer, RestPageFetcher<Customer>>;
type OrderQueries = QueryStore<AdminOrder, RestPageFetcher<AdminOrder>>;

/// Filters for the admin product list.
#[derive(Debug, Clone, Default)]
pub struct ProductListParams {
    pub search: String,
    pub category: Option<CategoryId>,
    /// Only products whose available stock is zero or negative.
    pub out_of_stock: bool,
}

impl ProductListParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if !self.search.is_empty() {
            query.push(("q".to_string(), self.search.clone()));
        }
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.to_string()));
        }
        if self.out_of_stock {
            query.push(("out_of_stock".to_string(), "true".to_string()));
        }
        query
    }
}

/// Filters for the admin customer list.
#[derive(Debug, Clone, Default)]
pub struct CustomerListParams {
    pub search: String,
}

/// Filters for the admin order list.
#[derive(Debug, Clone, Default)]
pub struct OrderListParams {
    pub status: Option<OrderStatus>,
}

/// The admin write surface.
///
/// The form and stock layers depend on this trait rather than on
/// [`AdminClient`] directly, so tests can script responses and record the
/// order of calls.
pub trait AdminApi: Send + Sync {
    /// Fetch a product with all form-editable fields.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<AdminProduct, ApiError>> + Send;

    /// Create a product, returning the persisted record.
    fn create_product(
        &self,
        input: ProductInput,
    ) -> impl Future<Output = Result<AdminProduct, ApiError>> + Send;

    /// Replace a product's editable fields.
    fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> impl Future<Output = Result<AdminProduct, ApiError>> + Send;

    /// Delete a product.
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Upload one image for a product.
    fn upload_image(
        &self,
        product_id: ProductId,
        upload: ImageUpload,
    ) -> impl Future<Output = Result<ProductImage, ApiError>> + Send;

    /// Delete a persisted image.
    fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ImageId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Replace the display order and primary flag of a product's images in
    /// one call.
    fn reorder_images(
        &self,
        product_id: ProductId,
        placements: Vec<ImagePlacement>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Record a stock transaction, returning it with server-assigned fields.
    fn create_stock_transaction(
        &self,
        input: StockTransactionInput,
    ) -> impl Future<Output = Result<StockTransaction, ApiError>> + Send;

    /// A product's full transaction history, newest first.
    fn stock_transactions(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<StockTransaction>, ApiError>> + Send;

    /// Drop every cached product list query.
    fn invalidate_products(&self) -> impl Future<Output = ()> + Send;
}

/// Client for the admin API.
///
/// Cheap to clone; all clones share the same transport and query stores.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    transport: HttpTransport,
    products: ProductQueries,
    groups: GroupQueries,
    customers: CustomerQueries,
    orders: OrderQueries,
}

impl AdminClient {
    /// Create a new admin client.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                transport: HttpTransport::new(
                    config.api_base_url.clone(),
                    Some(config.admin_token.clone()),
                ),
                products: QueryStore::new(),
                groups: QueryStore::new(),
                customers: QueryStore::new(),
                orders: QueryStore::new(),
            }),
        }
    }

    // =========================================================================
    // Product Lists
    // =========================================================================

    /// Shared paginated query over the admin product list.
    pub async fn products(
        &self,
        params: &ProductListParams,
    ) -> Arc<InfiniteQuery<ProductSummary, RestPageFetcher<ProductSummary>>> {
        let mut key = QueryKey::new("admin-products").with("q", params.search.clone());
        if let Some(category) = params.category {
            key = key.with("category", category);
        }
        if params.out_of_stock {
            key = key.with("out_of_stock", "true");
        }

        let transport = self.inner.transport.clone();
        let query = params.to_query();
        self.inner
            .products
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "admin/products", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    // =========================================================================
    // Product Groups
    // =========================================================================

    /// Shared paginated query over the product-group list.
    pub async fn product_groups(
        &self,
        search: &str,
    ) -> Arc<InfiniteQuery<ProductGroup, RestPageFetcher<ProductGroup>>> {
        let key = QueryKey::new("admin-groups").with("q", search);
        let transport = self.inner.transport.clone();
        let query = if search.is_empty() {
            vec![]
        } else {
            vec![("q".to_string(), search.to_string())]
        };
        self.inner
            .groups
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "admin/product-groups", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    /// Create a product group.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product_group(
        &self,
        input: ProductGroupInput,
    ) -> Result<ProductGroup, ApiError> {
        let group = self
            .inner
            .transport
            .post_json("admin/product-groups", &input)
            .await?;
        self.inner.groups.invalidate_all().await;
        Ok(group)
    }

    /// Replace a product group's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is not found or the API request fails.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_product_group(
        &self,
        id: ProductGroupId,
        input: ProductGroupInput,
    ) -> Result<ProductGroup, ApiError> {
        let group = self
            .inner
            .transport
            .put_json(&format!("admin/product-groups/{id}"), &input)
            .await?;
        self.inner.groups.invalidate_all().await;
        Ok(group)
    }

    /// Delete a product group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is not found or the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product_group(&self, id: ProductGroupId) -> Result<(), ApiError> {
        self.inner
            .transport
            .delete(&format!("admin/product-groups/{id}"))
            .await?;
        self.inner.groups.invalidate_all().await;
        Ok(())
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Shared paginated query over the customer list.
    pub async fn customers(
        &self,
        params: &CustomerListParams,
    ) -> Arc<InfiniteQuery<Customer, RestPageFetcher<Customer>>> {
        let key = QueryKey::new("admin-customers").with("q", params.search.clone());
        let transport = self.inner.transport.clone();
        let query = if params.search.is_empty() {
            vec![]
        } else {
            vec![("q".to_string(), params.search.clone())]
        };
        self.inner
            .customers
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "admin/customers", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input))]
    pub async fn create_customer(&self, input: CustomerInput) -> Result<Customer, ApiError> {
        let customer = self
            .inner
            .transport
            .post_json("admin/customers", &input)
            .await?;
        self.inner.customers.invalidate_all().await;
        Ok(customer)
    }

    /// Replace a customer's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is not found or the API request
    /// fails.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        input: CustomerInput,
    ) -> Result<Customer, ApiError> {
        let customer = self
            .inner
            .transport
            .put_json(&format!("admin/customers/{id}"), &input)
            .await?;
        self.inner.customers.invalidate_all().await;
        Ok(customer)
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is not found or the API request
    /// fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        self.inner
            .transport
            .delete(&format!("admin/customers/{id}"))
            .await?;
        self.inner.customers.invalidate_all().await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Shared paginated query over the admin order list.
    pub async fn orders(
        &self,
        params: &OrderListParams,
    ) -> Arc<InfiniteQuery<AdminOrder, RestPageFetcher<AdminOrder>>> {
        let mut key = QueryKey::new("admin-orders");
        let mut query = Vec::new();
        if let Some(status) = params.status {
            key = key.with("status", status.as_str());
            query.push(("status".to_string(), status.as_str().to_string()));
        }

        let transport = self.inner.transport.clone();
        self.inner
            .orders
            .get_or_insert(key, || {
                RestPageFetcher::new(transport, "admin/orders", query, DEFAULT_PAGE_SIZE)
            })
            .await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the transition is
    /// rejected.
    #[instrument(skip(self), fields(id = %id, status = status.as_str()))]
    pub async fn set_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<AdminOrder, ApiError> {
        let order = self
            .inner
            .transport
            .put_json(
                &format!("admin/orders/{id}/status"),
                &serde_json::json!({ "status": status }),
            )
            .await?;
        self.inner.orders.invalidate_all().await;
        Ok(order)
    }
}

impl AdminApi for AdminClient {
    #[instrument(skip(self), fields(id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<AdminProduct, ApiError> {
        self.inner
            .transport
            .get_json(&format!("admin/products/{id}"), &[])
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_product(&self, input: ProductInput) -> Result<AdminProduct, ApiError> {
        let product = self
            .inner
            .transport
            .post_json("admin/products", &input)
            .await?;
        self.inner.products.invalidate_all().await;
        Ok(product)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<AdminProduct, ApiError> {
        let product = self
            .inner
            .transport
            .put_json(&format!("admin/products/{id}"), &input)
            .await?;
        self.inner.products.invalidate_all().await;
        Ok(product)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.inner
            .transport
            .delete(&format!("admin/products/{id}"))
            .await?;
        self.inner.products.invalidate_all().await;
        Ok(())
    }

    #[instrument(
        skip(self, upload),
        fields(product_id = %product_id, position = upload.position)
    )]
    async fn upload_image(
        &self,
        product_id: ProductId,
        upload: ImageUpload,
    ) -> Result<ProductImage, ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(upload.bytes).file_name(upload.file_name))
            .text("position", upload.position.to_string())
            .text("is_primary", upload.is_primary.to_string());
        self.inner
            .transport
            .post_multipart(&format!("admin/products/{product_id}/images"), form)
            .await
    }

    #[instrument(skip(self), fields(product_id = %product_id, image_id = %image_id))]
    async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        self.inner
            .transport
            .delete(&format!("admin/products/{product_id}/images/{image_id}"))
            .await
    }

    #[instrument(skip(self, placements), fields(product_id = %product_id))]
    async fn reorder_images(
        &self,
        product_id: ProductId,
        placements: Vec<ImagePlacement>,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .inner
            .transport
            .put_json(
                &format!("admin/products/{product_id}/images/order"),
                &placements,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id, delta = input.delta))]
    async fn create_stock_transaction(
        &self,
        input: StockTransactionInput,
    ) -> Result<StockTransaction, ApiError> {
        let transaction = self
            .inner
            .transport
            .post_json("admin/stock-transactions", &input)
            .await?;
        self.inner.products.invalidate_all().await;
        Ok(transaction)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock_transactions(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<StockTransaction>, ApiError> {
        self.inner
            .transport
            .get_json(
                &format!("admin/products/{product_id}/stock-transactions"),
                &[],
            )
            .await
    }

    async fn invalidate_products(&self) {
        self.inner.products.invalidate_all().await;
    }
}
