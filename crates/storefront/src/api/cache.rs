//! Cache types for catalog detail responses.

use arenda_core::{ProductGroupId, ProductId};

use super::types::{CatalogProduct, ProductGroup};

/// Cache key for catalog detail records.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Group(ProductGroupId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<CatalogProduct>),
    Group(Box<ProductGroup>),
}
