//! Shared test doubles for the Arenda client crates.
//!
//! [`FakeAdmin`] implements the admin write surface entirely in memory and
//! records every call in order, so the form and stock orchestration tests
//! can assert on the exact request sequence without a backend.

use std::sync::{Mutex, Once};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;

use arenda_admin::api::types::{
    AdminProduct, DeliveryAttrs, Dimensions, ImagePlacement, ImageUpload, ProductImage,
    ProductInput, Seo, SetupAttrs, StockTransaction, StockTransactionInput, Visibility,
};
use arenda_admin::api::AdminApi;
use arenda_client::{ApiError, ErrorPayload};
use arenda_core::{
    CategoryId, ImageId, InstallerQualification, Price, ProductId, RentalRate,
    StockTransactionId, TransportRestriction,
};

/// Install a log subscriber reading `RUST_LOG`, once per test binary.
///
/// Run a test with `RUST_LOG=arenda_client=debug` to watch the query
/// cache and transport layers narrate what they do.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One recorded admin call, in the order the code under test issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetProduct(ProductId),
    CreateProduct { name: String },
    UpdateProduct(ProductId),
    DeleteProduct(ProductId),
    UploadImage {
        product_id: ProductId,
        file_name: String,
        position: u32,
        is_primary: bool,
    },
    DeleteImage {
        product_id: ProductId,
        image_id: ImageId,
    },
    ReorderImages {
        product_id: ProductId,
        placements: Vec<ImagePlacement>,
    },
    CreateStockTransaction {
        product_id: ProductId,
        delta: i64,
        affects_available: bool,
        scheduled: bool,
    },
    StockTransactions(ProductId),
    InvalidateProducts,
}

/// A sample product with the given id and images, otherwise minimal.
#[must_use]
pub fn sample_product(id: i32, images: Vec<ProductImage>) -> AdminProduct {
    AdminProduct {
        id: ProductId::new(id),
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
        images,
        complementary: vec![],
        similar: vec![],
        stock_qty: 20,
        available_stock_qty: 20,
    }
}

/// A persisted image for seeding [`sample_product`].
#[must_use]
pub fn persisted_image(id: i32, position: u32, is_primary: bool) -> ProductImage {
    ProductImage {
        id: ImageId::new(id),
        url: format!("https://cdn.example.com/{id}.jpg"),
        position,
        is_primary,
    }
}

fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        payload: ErrorPayload::from_message(message.to_string()),
    }
}

/// In-memory admin API double.
#[derive(Debug, Default)]
pub struct FakeAdmin {
    calls: Mutex<Vec<Call>>,
    /// Product served by `get_product`; `None` makes loads fail.
    product: Mutex<Option<AdminProduct>>,
    next_id: AtomicI32,
    /// When set, the next product create/update fails.
    pub fail_save: AtomicBool,
    /// When set, every image upload fails.
    pub fail_upload: AtomicBool,
}

impl FakeAdmin {
    /// A fake that serves `product` from `get_product`.
    #[must_use]
    pub fn with_product(product: AdminProduct) -> Self {
        Self {
            product: Mutex::new(Some(product)),
            ..Self::default()
        }
    }

    /// Every call recorded so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous test thread poisoned the internal lock.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn assign_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 100
    }

    fn saved_product(&self, id: ProductId, input: &ProductInput) -> AdminProduct {
        let mut product = sample_product(0, vec![]);
        product.id = id;
        product.name = input.name.clone();
        product.category_id = input.category_id;
        product.price_rub = input.price_rub;
        product.dimensions = input.dimensions.clone();
        product.rental = input.rental.clone();
        product
    }
}

impl AdminApi for FakeAdmin {
    async fn get_product(&self, id: ProductId) -> Result<AdminProduct, ApiError> {
        self.record(Call::GetProduct(id));
        self.product
            .lock()
            .expect("product lock")
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("admin/products/{id}")))
    }

    async fn create_product(&self, input: ProductInput) -> Result<AdminProduct, ApiError> {
        self.record(Call::CreateProduct {
            name: input.name.clone(),
        });
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(server_error("create failed"));
        }
        Ok(self.saved_product(ProductId::new(self.assign_id()), &input))
    }

    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<AdminProduct, ApiError> {
        self.record(Call::UpdateProduct(id));
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(server_error("update failed"));
        }
        Ok(self.saved_product(id, &input))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.record(Call::DeleteProduct(id));
        Ok(())
    }

    async fn upload_image(
        &self,
        product_id: ProductId,
        upload: ImageUpload,
    ) -> Result<ProductImage, ApiError> {
        self.record(Call::UploadImage {
            product_id,
            file_name: upload.file_name.clone(),
            position: upload.position,
            is_primary: upload.is_primary,
        });
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(server_error("upload failed"));
        }
        Ok(ProductImage {
            id: ImageId::new(self.assign_id()),
            url: format!("https://cdn.example.com/{}", upload.file_name),
            position: upload.position,
            is_primary: upload.is_primary,
        })
    }

    async fn delete_image(
        &self,
        product_id: ProductId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        self.record(Call::DeleteImage {
            product_id,
            image_id,
        });
        Ok(())
    }

    async fn reorder_images(
        &self,
        product_id: ProductId,
        placements: Vec<ImagePlacement>,
    ) -> Result<(), ApiError> {
        self.record(Call::ReorderImages {
            product_id,
            placements,
        });
        Ok(())
    }

    async fn create_stock_transaction(
        &self,
        input: StockTransactionInput,
    ) -> Result<StockTransaction, ApiError> {
        self.record(Call::CreateStockTransaction {
            product_id: input.product_id,
            delta: input.delta,
            affects_available: input.affects_available,
            scheduled: input.scheduled_for.is_some(),
        });
        Ok(StockTransaction {
            id: StockTransactionId::new(self.assign_id()),
            product_id: input.product_id,
            delta: input.delta,
            affects_available: input.affects_available,
            // Scheduled transactions stay pending until the backend clock
            // reaches them.
            applied: input.scheduled_for.is_none(),
            scheduled_for: input.scheduled_for,
            order_id: input.order_id,
            note: input.note,
            created_at: Utc::now(),
        })
    }

    async fn stock_transactions(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<StockTransaction>, ApiError> {
        self.record(Call::StockTransactions(product_id));
        Ok(vec![])
    }

    async fn invalidate_products(&self) {
        self.record(Call::InvalidateProducts);
    }
}
