//! Public catalog record types.

use arenda_client::Keyed;
use arenda_core::{CategoryId, ColorId, ImageId, Price, ProductGroupId, ProductId, RentalRate};
use serde::{Deserialize, Serialize};

/// An image attached to a product, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub id: ImageId,
    pub url: String,
    /// 1-based display position.
    pub position: u32,
    /// Exactly one image per product is primary.
    pub is_primary: bool,
}

/// A product as shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    /// Base rouble price shown on cards.
    pub price_rub: Price,
    /// Rental price schedule.
    pub rental: RentalRate,
    /// Ordered images; the primary image comes first.
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    pub show_on_site: bool,
    #[serde(default)]
    pub show_in_new_arrivals: bool,
    /// Populated when the detail endpoint is asked to expand relations.
    #[serde(default)]
    pub complementary: Vec<ProductId>,
    #[serde(default)]
    pub similar: Vec<ProductId>,
}

impl CatalogProduct {
    /// The primary image, when the product has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&CatalogImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }
}

impl Keyed for CatalogProduct {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// A curated group of products (e.g. a themed set) on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: ProductGroupId,
    pub name: String,
    pub category_id: CategoryId,
    /// Member products in display order.
    pub product_ids: Vec<ProductId>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl Keyed for ProductGroup {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Sort orders supported by the product list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    Name,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Name => "name",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

/// Filter/sort parameters for the public product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListParams {
    /// Free-text search; blank means no search filter.
    pub search: String,
    pub category: Option<CategoryId>,
    pub color: Option<ColorId>,
    pub sort: ProductSort,
    /// Only products flagged for the new-arrivals block.
    pub new_arrivals: bool,
}

impl ProductListParams {
    /// Query-string form sent to the list endpoint.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if !self.search.is_empty() {
            query.push(("q".to_string(), self.search.clone()));
        }
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.to_string()));
        }
        if let Some(color) = self.color {
            query.push(("color".to_string(), color.to_string()));
        }
        query.push(("sort".to_string(), self.sort.as_str().to_string()));
        if self.new_arrivals {
            query.push(("new_arrivals".to_string(), "true".to_string()));
        }
        query
    }
}

/// Filter parameters for the product-group list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupListParams {
    pub search: String,
    pub category: Option<CategoryId>,
}

impl GroupListParams {
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if !self.search.is_empty() {
            query.push(("q".to_string(), self.search.clone()));
        }
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_image_falls_back_to_first() {
        let product: CatalogProduct = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Стул",
            "category_id": 2,
            "price_rub": "100",
            "rental": {"mode": "flat", "base_days": 1, "price_per_day": "100"},
            "images": [
                {"id": 10, "url": "/img/10.jpg", "position": 1, "is_primary": false},
                {"id": 11, "url": "/img/11.jpg", "position": 2, "is_primary": false}
            ],
            "show_on_site": true
        }))
        .expect("deserialize");

        assert_eq!(product.primary_image().map(|i| i.id), Some(ImageId::new(10)));
    }

    #[test]
    fn test_product_list_query_skips_blank_search() {
        let params = ProductListParams::default();
        let query = params.to_query();
        assert!(!query.iter().any(|(name, _)| name == "q"));
        assert!(query.contains(&("sort".to_string(), "newest".to_string())));
    }
}
