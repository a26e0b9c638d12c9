//! Admin record types and write payloads.

use arenda_client::Keyed;
use arenda_core::{
    CategoryId, CustomerId, CustomerKind, DeliveryMethod, ImageId, InstallerQualification,
    OrderId, OrderStatus, Price, ProductGroupId, ProductId, RentalRate, StockTransactionId,
    TransportRestriction,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// Product dimensions as a shape-discriminated union.
///
/// Exactly one variant is populated per product; the `shape` tag on the wire
/// selects it. Never flattened into one struct of optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Dimensions {
    #[serde(rename = "circle__diameter")]
    Circle { diameter_cm: Decimal },
    #[serde(rename = "line__length")]
    Line { length_cm: Decimal },
    #[serde(rename = "rectangle__width_length")]
    Rectangle {
        width_cm: Decimal,
        length_cm: Decimal,
    },
    #[serde(rename = "cylinder__diameter_height")]
    Cylinder {
        diameter_cm: Decimal,
        height_cm: Decimal,
    },
    #[serde(rename = "box__width_length_height")]
    Box {
        width_cm: Decimal,
        length_cm: Decimal,
        height_cm: Decimal,
    },
}

/// Delivery-related attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttrs {
    pub volume_m3: Decimal,
    pub weight_kg: Decimal,
    #[serde(default)]
    pub transport_restriction: TransportRestriction,
    pub self_pickup_allowed: bool,
}

/// Installation/teardown attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupAttrs {
    pub install_minutes: u32,
    pub uninstall_minutes: u32,
    #[serde(default)]
    pub qualification: InstallerQualification,
    pub min_installers: u32,
}

/// Where the product is surfaced on the public site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub show_on_site: bool,
    #[serde(default)]
    pub show_in_new_arrivals: bool,
    #[serde(default)]
    pub is_category_cover: bool,
}

/// SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
}

/// A server-persisted product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub url: String,
    /// 1-based display position.
    pub position: u32,
    /// Exactly one image per product is primary.
    pub is_primary: bool,
}

/// A fully populated product in the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub price_rub: Price,
    pub dimensions: Dimensions,
    /// How many people the product seats, when applicable.
    #[serde(default)]
    pub seats: Option<u32>,
    pub delivery: DeliveryAttrs,
    pub setup: SetupAttrs,
    pub rental: RentalRate,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub complementary: Vec<ProductId>,
    #[serde(default)]
    pub similar: Vec<ProductId>,
    /// Total units owned.
    pub stock_qty: i64,
    /// Units not reserved by open orders.
    pub available_stock_qty: i64,
}

/// A product row in admin lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub price_rub: Price,
    #[serde(default)]
    pub primary_image_url: Option<String>,
    pub stock_qty: i64,
    pub available_stock_qty: i64,
    pub show_on_site: bool,
}

impl Keyed for ProductSummary {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Writable product fields sent on create/update.
///
/// Empty optional sub-objects are omitted from the JSON body.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub category_id: CategoryId,
    pub price_rub: Price,
    pub dimensions: Dimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    pub delivery: DeliveryAttrs,
    pub setup: SetupAttrs,
    pub rental: RentalRate,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Seo::is_empty")]
    pub seo: Seo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub complementary: Vec<ProductId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<ProductId>,
}

impl Seo {
    /// Whether all SEO fields are blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.keywords.is_empty()
    }
}

/// A new image to upload: multipart file data plus its display position.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// 1-based display position.
    pub position: u32,
    pub is_primary: bool,
}

/// Final position and primary flag for one image in a reorder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub id: ImageId,
    pub position: u32,
    pub is_primary: bool,
}

// =============================================================================
// Product Groups
// =============================================================================

/// A curated group of products.
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

/// Writable product-group fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProductGroupInput {
    pub name: String,
    pub category_id: CategoryId,
    pub product_ids: Vec<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_id: Option<ImageId>,
}

// =============================================================================
// Customers
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub kind: CustomerKind,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Company name for business customers.
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Marketing consent.
    pub consent: bool,
    #[serde(default)]
    pub notes: String,
}

impl Keyed for Customer {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Writable customer fields.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerInput {
    pub kind: CustomerKind,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub phone: String,
    pub email: String,
    pub consent: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

// =============================================================================
// Orders
// =============================================================================

/// One product line within an admin order view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_rub: Price,
}

impl AdminOrderLine {
    /// Line subtotal per rental day.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price_rub.times(self.quantity)
    }
}

/// An order in the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrder {
    pub id: OrderId,
    pub status: OrderStatus,
    pub customer_id: CustomerId,
    pub created_at: NaiveDate,
    pub rental_from: NaiveDate,
    pub rental_to: NaiveDate,
    pub delivery: DeliveryMethod,
    #[serde(default)]
    pub address: Option<String>,
    pub lines: Vec<AdminOrderLine>,
}

impl Keyed for AdminOrder {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

// =============================================================================
// Stock Transactions
// =============================================================================

/// One signed quantity adjustment in a product's stock ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: StockTransactionId,
    pub product_id: ProductId,
    /// Signed quantity delta (negative for write-offs).
    pub delta: i64,
    /// Whether the delta also moves the "available" counter, not only the
    /// total.
    pub affects_available: bool,
    /// False for transactions scheduled in the future; the backend flips it
    /// when the scheduled time arrives.
    pub applied: bool,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Keyed for StockTransaction {
    fn item_key(&self) -> String {
        self.id.to_string()
    }
}

/// Writable stock-transaction fields.
#[derive(Debug, Clone, Serialize)]
pub struct StockTransactionInput {
    pub product_id: ProductId,
    pub delta: i64,
    pub affects_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_wire_tag() {
        let dims = Dimensions::Circle {
            diameter_cm: Decimal::from(90),
        };
        let json = serde_json::to_value(&dims).expect("serialize");
        assert_eq!(json["shape"], "circle__diameter");
        assert_eq!(json["diameter_cm"], "90");
    }

    #[test]
    fn test_dimensions_round_trip() {
        let json = serde_json::json!({
            "shape": "box__width_length_height",
            "width_cm": "40",
            "length_cm": "60",
            "height_cm": "75"
        });
        let dims: Dimensions = serde_json::from_value(json).expect("deserialize");
        assert_eq!(
            dims,
            Dimensions::Box {
                width_cm: Decimal::from(40),
                length_cm: Decimal::from(60),
                height_cm: Decimal::from(75),
            }
        );
    }

    #[test]
    fn test_product_input_omits_empty_sections() {
        let input = ProductInput {
            name: "Стул".to_string(),
            category_id: CategoryId::new(1),
            price_rub: Price::from_rub(100),
            dimensions: Dimensions::Line {
                length_cm: Decimal::from(120),
            },
            seats: None,
            delivery: DeliveryAttrs {
                volume_m3: Decimal::new(1, 1),
                weight_kg: Decimal::from(5),
                transport_restriction: TransportRestriction::None,
                self_pickup_allowed: true,
            },
            setup: SetupAttrs {
                install_minutes: 0,
                uninstall_minutes: 0,
                qualification: InstallerQualification::Any,
                min_installers: 1,
            },
            rental: RentalRate::Flat {
                base_days: 1,
                price_per_day: Price::from_rub(100),
            },
            visibility: Visibility::default(),
            seo: Seo::default(),
            complementary: vec![],
            similar: vec![],
        };
        let json = serde_json::to_value(&input).expect("serialize");
        assert!(json.get("seo").is_none());
        assert!(json.get("seats").is_none());
        assert!(json.get("complementary").is_none());
    }
}
