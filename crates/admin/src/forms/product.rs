//! The multi-step product form.
//!
//! The form holds an owned draft of raw field strings. Validation is a pure
//! function over the draft, recomputed on every change; nothing is written
//! to the network until [`ProductForm::submit`], which runs the whole
//! create-or-edit orchestration (product body, image deletions, uploads,
//! reorder, cache invalidation) and only then reports completion.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use arenda_client::ApiError;
use arenda_core::{
    CategoryId, InstallerQualification, MAX_TIERS, Price, ProductId, RentalRate, RentalTier,
    TransportRestriction,
};

use crate::api::types::{
    AdminProduct, DeliveryAttrs, Dimensions, ImagePlacement, ProductInput, Seo, SetupAttrs,
    Visibility,
};
use crate::api::AdminApi;
use crate::forms::images::ImageList;
use crate::forms::input::normalize_decimal;

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Lifecycle of the form dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode, waiting for the product to load.
    Loading,
    /// Draft is editable.
    Ready,
    /// Submit in flight; inputs are disabled.
    Submitting,
    /// Submitted successfully; the dialog is done.
    Closed,
}

/// The shape selector for the dimensions step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Line,
    Rectangle,
    Cylinder,
    Box,
}

/// Raw dimension fields; only those relevant to the selected shape are
/// shown and validated.
#[derive(Debug, Clone, Default)]
pub struct DimensionsDraft {
    pub shape: Option<Shape>,
    pub diameter_cm: String,
    pub length_cm: String,
    pub width_cm: String,
    pub height_cm: String,
}

/// One raw tier row in the tiered-rate editor.
#[derive(Debug, Clone, Default)]
pub struct TierDraft {
    pub end_day: String,
    pub price: String,
}

/// Raw rental-rate fields.
#[derive(Debug, Clone)]
pub struct RentalDraft {
    pub tiered: bool,
    pub base_days: String,
    pub price_per_day: String,
    pub tiers: Vec<TierDraft>,
}

impl Default for RentalDraft {
    fn default() -> Self {
        Self {
            tiered: false,
            base_days: "1".to_string(),
            price_per_day: String::new(),
            tiers: vec![TierDraft::default()],
        }
    }
}

/// Field-path keyed validation errors.
///
/// Paths mirror the draft structure, e.g. `dimensions.circle.diameter_cm`
/// or `rental.tiers.1.end_day`, so each step can show its own errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// Whether the draft passed every check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error for one field path, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// All errors, ordered by field path.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(path.into()).or_insert_with(|| message.into());
    }
}

/// Why a submit was rejected or failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form is not in a submittable phase (still loading, load failed,
    /// already submitting, or closed).
    #[error("form is not ready to submit")]
    NotLoaded,

    /// The draft failed validation; nothing was sent.
    #[error("draft failed validation")]
    Invalid(ValidationReport),

    /// An API call failed mid-orchestration; the draft is preserved.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Draft state of the product form.
#[derive(Debug, Clone)]
pub struct ProductForm {
    mode: FormMode,
    phase: FormPhase,
    load_failed: bool,

    pub name: String,
    pub category_id: String,
    pub price_rub: String,

    pub dimensions: DimensionsDraft,
    /// Seats, for products people sit on. Blank means not applicable.
    pub seats: String,

    pub volume_m3: String,
    pub weight_kg: String,
    pub transport_restriction: TransportRestriction,
    pub self_pickup_allowed: bool,

    pub install_minutes: String,
    pub uninstall_minutes: String,
    pub qualification: InstallerQualification,
    pub min_installers: String,

    pub rental: RentalDraft,

    pub visibility: Visibility,
    pub seo: Seo,

    pub images: ImageList,

    pub complementary: Vec<ProductId>,
    pub similar: Vec<ProductId>,
}

impl ProductForm {
    /// A blank create-mode form, immediately editable.
    #[must_use]
    pub fn create() -> Self {
        Self::blank(FormMode::Create, FormPhase::Ready)
    }

    /// An edit-mode form; call [`Self::load`] before editing.
    #[must_use]
    pub fn edit(id: ProductId) -> Self {
        Self::blank(FormMode::Edit(id), FormPhase::Loading)
    }

    fn blank(mode: FormMode, phase: FormPhase) -> Self {
        Self {
            mode,
            phase,
            load_failed: false,
            name: String::new(),
            category_id: String::new(),
            price_rub: String::new(),
            dimensions: DimensionsDraft::default(),
            seats: String::new(),
            volume_m3: String::new(),
            weight_kg: String::new(),
            transport_restriction: TransportRestriction::None,
            self_pickup_allowed: true,
            install_minutes: "0".to_string(),
            uninstall_minutes: "0".to_string(),
            qualification: InstallerQualification::Any,
            min_installers: "1".to_string(),
            rental: RentalDraft::default(),
            visibility: Visibility::default(),
            seo: Seo::default(),
            images: ImageList::default(),
            complementary: Vec::new(),
            similar: Vec::new(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Create or edit mode.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Whether the edit-mode load failed; submit is blocked until a reload
    /// succeeds.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Select the shape, clearing the dimension fields of the previous one.
    pub fn set_shape(&mut self, shape: Shape) {
        if self.dimensions.shape == Some(shape) {
            return;
        }
        self.dimensions = DimensionsDraft {
            shape: Some(shape),
            ..DimensionsDraft::default()
        };
    }

    /// Switch between flat and tiered pricing, keeping the other mode's
    /// fields so toggling back loses nothing.
    pub fn set_tiered(&mut self, tiered: bool) {
        self.rental.tiered = tiered;
    }

    /// Append an empty tier row, capped at the tier limit.
    pub fn add_tier(&mut self) {
        if self.rental.tiers.len() < MAX_TIERS {
            self.rental.tiers.push(TierDraft::default());
        }
    }

    /// Remove a tier row, keeping at least one.
    pub fn remove_tier(&mut self, index: usize) {
        if self.rental.tiers.len() > 1 && index < self.rental.tiers.len() {
            self.rental.tiers.remove(index);
        }
    }

    /// Load the product into the draft (edit mode).
    ///
    /// A failed load leaves the form blocked; calling again retries.
    pub async fn load<A: AdminApi>(&mut self, api: &A) -> Result<(), ApiError> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(());
        };
        self.phase = FormPhase::Loading;
        match api.get_product(id).await {
            Ok(product) => {
                self.populate(product);
                self.load_failed = false;
                self.phase = FormPhase::Ready;
                Ok(())
            }
            Err(e) => {
                self.load_failed = true;
                self.phase = FormPhase::Ready;
                Err(e)
            }
        }
    }

    fn populate(&mut self, product: AdminProduct) {
        self.name = product.name;
        self.category_id = product.category_id.to_string();
        self.price_rub = product.price_rub.amount().to_string();
        self.dimensions = dimensions_draft(&product.dimensions);
        self.seats = product.seats.map(|s| s.to_string()).unwrap_or_default();
        self.volume_m3 = product.delivery.volume_m3.to_string();
        self.weight_kg = product.delivery.weight_kg.to_string();
        self.transport_restriction = product.delivery.transport_restriction;
        self.self_pickup_allowed = product.delivery.self_pickup_allowed;
        self.install_minutes = product.setup.install_minutes.to_string();
        self.uninstall_minutes = product.setup.uninstall_minutes.to_string();
        self.qualification = product.setup.qualification;
        self.min_installers = product.setup.min_installers.to_string();
        self.rental = rental_draft(&product.rental);
        self.visibility = product.visibility;
        self.seo = product.seo;
        self.images = ImageList::from_persisted(product.images);
        self.complementary = product.complementary;
        self.similar = product.similar;
    }

    /// Validate the whole draft.
    ///
    /// Pure over the draft; safe to call on every keystroke.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.name.trim().is_empty() {
            report.push("name", "required");
        }
        check_id(&mut report, "category_id", &self.category_id);
        check_price(&mut report, "price_rub", &self.price_rub);

        self.validate_dimensions(&mut report);

        if !self.seats.is_empty() && parse_u32(&self.seats).is_none_or(|s| s == 0) {
            report.push("seats", "must be a positive integer");
        }

        check_positive_decimal(&mut report, "delivery.volume_m3", &self.volume_m3);
        check_positive_decimal(&mut report, "delivery.weight_kg", &self.weight_kg);

        check_u32(&mut report, "setup.install_minutes", &self.install_minutes);
        check_u32(&mut report, "setup.uninstall_minutes", &self.uninstall_minutes);
        if parse_u32(&self.min_installers).is_none_or(|n| n == 0) {
            report.push("setup.min_installers", "must be a positive integer");
        }

        self.validate_rental(&mut report);

        if self.visibility.show_on_site && self.images.is_empty() {
            report.push("images", "at least one image is required to show on site");
        }

        report
    }

    fn validate_dimensions(&self, report: &mut ValidationReport) {
        let Some(shape) = self.dimensions.shape else {
            report.push("dimensions.shape", "required");
            return;
        };
        let d = &self.dimensions;
        match shape {
            Shape::Circle => {
                check_positive_decimal(report, "dimensions.circle.diameter_cm", &d.diameter_cm);
            }
            Shape::Line => {
                check_positive_decimal(report, "dimensions.line.length_cm", &d.length_cm);
            }
            Shape::Rectangle => {
                check_positive_decimal(report, "dimensions.rectangle.width_cm", &d.width_cm);
                check_positive_decimal(report, "dimensions.rectangle.length_cm", &d.length_cm);
            }
            Shape::Cylinder => {
                check_positive_decimal(report, "dimensions.cylinder.diameter_cm", &d.diameter_cm);
                check_positive_decimal(report, "dimensions.cylinder.height_cm", &d.height_cm);
            }
            Shape::Box => {
                check_positive_decimal(report, "dimensions.box.width_cm", &d.width_cm);
                check_positive_decimal(report, "dimensions.box.length_cm", &d.length_cm);
                check_positive_decimal(report, "dimensions.box.height_cm", &d.height_cm);
            }
        }
    }

    fn validate_rental(&self, report: &mut ValidationReport) {
        if !self.rental.tiered {
            if parse_u32(&self.rental.base_days).is_none_or(|d| d == 0) {
                report.push("rental.base_days", "must be a positive integer");
            }
            check_price(report, "rental.price_per_day", &self.rental.price_per_day);
            return;
        }

        if self.rental.tiers.is_empty() {
            report.push("rental.tiers", "at least one tier is required");
            return;
        }
        if self.rental.tiers.len() > MAX_TIERS {
            report.push("rental.tiers", format!("at most {MAX_TIERS} tiers"));
        }

        let mut previous_end: Option<u32> = None;
        for (index, tier) in self.rental.tiers.iter().enumerate() {
            let end_path = format!("rental.tiers.{index}.end_day");
            match parse_u32(&tier.end_day) {
                None => report.push(end_path, "must be a number"),
                Some(end_day) if end_day < 2 => {
                    report.push(end_path, "must be at least 2");
                }
                Some(end_day) => {
                    if previous_end.is_some_and(|prev| end_day <= prev) {
                        report.push(end_path, "must be greater than previous");
                    }
                    previous_end = Some(end_day);
                }
            }
            check_price(report, format!("rental.tiers.{index}.price"), &tier.price);
        }
    }

    /// Build the wire payload from a valid draft.
    ///
    /// # Errors
    ///
    /// Returns the validation report when the draft is invalid.
    pub fn to_input(&self) -> Result<ProductInput, ValidationReport> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(report);
        }

        // Validation guarantees every parse below succeeds; the fallbacks
        // are unreachable.
        Ok(ProductInput {
            name: self.name.trim().to_string(),
            category_id: CategoryId::new(parse_i32(&self.category_id).unwrap_or_default()),
            price_rub: Price::parse_input(&self.price_rub).unwrap_or(Price::ZERO),
            dimensions: self.dimensions_value(),
            seats: parse_u32(&self.seats),
            delivery: DeliveryAttrs {
                volume_m3: parse_decimal(&self.volume_m3).unwrap_or_default(),
                weight_kg: parse_decimal(&self.weight_kg).unwrap_or_default(),
                transport_restriction: self.transport_restriction,
                self_pickup_allowed: self.self_pickup_allowed,
            },
            setup: SetupAttrs {
                install_minutes: parse_u32(&self.install_minutes).unwrap_or_default(),
                uninstall_minutes: parse_u32(&self.uninstall_minutes).unwrap_or_default(),
                qualification: self.qualification,
                min_installers: parse_u32(&self.min_installers).unwrap_or(1),
            },
            rental: self.rental_value(),
            visibility: self.visibility,
            seo: self.seo.clone(),
            complementary: self.complementary.clone(),
            similar: self.similar.clone(),
        })
    }

    fn dimensions_value(&self) -> Dimensions {
        let d = &self.dimensions;
        let field = |raw: &str| parse_decimal(raw).unwrap_or_default();
        match d.shape {
            Some(Shape::Line) => Dimensions::Line {
                length_cm: field(&d.length_cm),
            },
            Some(Shape::Rectangle) => Dimensions::Rectangle {
                width_cm: field(&d.width_cm),
                length_cm: field(&d.length_cm),
            },
            Some(Shape::Cylinder) => Dimensions::Cylinder {
                diameter_cm: field(&d.diameter_cm),
                height_cm: field(&d.height_cm),
            },
            Some(Shape::Box) => Dimensions::Box {
                width_cm: field(&d.width_cm),
                length_cm: field(&d.length_cm),
                height_cm: field(&d.height_cm),
            },
            // Circle, and unreachable for a validated draft.
            _ => Dimensions::Circle {
                diameter_cm: field(&d.diameter_cm),
            },
        }
    }

    fn rental_value(&self) -> RentalRate {
        if self.rental.tiered {
            RentalRate::Tiered {
                tiers: self
                    .rental
                    .tiers
                    .iter()
                    .map(|tier| RentalTier {
                        end_day: parse_u32(&tier.end_day).unwrap_or(2),
                        price: Price::parse_input(&tier.price).unwrap_or(Price::ZERO),
                    })
                    .collect(),
            }
        } else {
            RentalRate::Flat {
                base_days: parse_u32(&self.rental.base_days).unwrap_or(1),
                price_per_day: Price::parse_input(&self.rental.price_per_day)
                    .unwrap_or(Price::ZERO),
            }
        }
    }

    /// Submit the draft.
    ///
    /// Create mode posts the product, then uploads the attached images in
    /// display order. Edit mode updates the product, deletes the removed
    /// images, uploads new ones, and pushes the final ordering of every
    /// surviving image, the just-uploaded ones included, in one reorder
    /// call. Either way the product list caches are invalidated before the
    /// call returns.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] without any network traffic when
    /// the draft fails validation, or [`SubmitError::Api`] when a call
    /// fails; the draft survives either for correction and retry.
    pub async fn submit<A: AdminApi>(&mut self, api: &A) -> Result<AdminProduct, SubmitError> {
        if self.phase != FormPhase::Ready || self.load_failed {
            return Err(SubmitError::NotLoaded);
        }
        let input = self.to_input().map_err(SubmitError::Invalid)?;

        self.phase = FormPhase::Submitting;
        let result = self.run_submit(api, input).await;
        match result {
            Ok(product) => {
                self.phase = FormPhase::Closed;
                Ok(product)
            }
            Err(e) => {
                self.phase = FormPhase::Ready;
                Err(SubmitError::Api(e))
            }
        }
    }

    async fn run_submit<A: AdminApi>(
        &self,
        api: &A,
        input: ProductInput,
    ) -> Result<AdminProduct, ApiError> {
        match self.mode {
            FormMode::Create => {
                let product = api.create_product(input).await?;
                for upload in self.images.pending_uploads() {
                    api.upload_image(product.id, upload).await?;
                }
                api.invalidate_products().await;
                Ok(product)
            }
            FormMode::Edit(id) => {
                let product = api.update_product(id, input).await?;
                for image_id in self.images.removed_ids() {
                    api.delete_image(id, *image_id).await?;
                }
                // The reorder call must cover uploaded images too, so their
                // server-assigned ids join the persisted placements.
                let mut placements = self.images.placements();
                for upload in self.images.pending_uploads() {
                    let position = upload.position;
                    let is_primary = upload.is_primary;
                    let uploaded = api.upload_image(id, upload).await?;
                    placements.push(ImagePlacement {
                        id: uploaded.id,
                        position,
                        is_primary,
                    });
                }
                placements.sort_by_key(|placement| placement.position);
                api.reorder_images(id, placements).await?;
                api.invalidate_products().await;
                Ok(product)
            }
        }
    }
}

fn dimensions_draft(dimensions: &Dimensions) -> DimensionsDraft {
    let mut draft = DimensionsDraft::default();
    match dimensions {
        Dimensions::Circle { diameter_cm } => {
            draft.shape = Some(Shape::Circle);
            draft.diameter_cm = diameter_cm.to_string();
        }
        Dimensions::Line { length_cm } => {
            draft.shape = Some(Shape::Line);
            draft.length_cm = length_cm.to_string();
        }
        Dimensions::Rectangle { width_cm, length_cm } => {
            draft.shape = Some(Shape::Rectangle);
            draft.width_cm = width_cm.to_string();
            draft.length_cm = length_cm.to_string();
        }
        Dimensions::Cylinder {
            diameter_cm,
            height_cm,
        } => {
            draft.shape = Some(Shape::Cylinder);
            draft.diameter_cm = diameter_cm.to_string();
            draft.height_cm = height_cm.to_string();
        }
        Dimensions::Box {
            width_cm,
            length_cm,
            height_cm,
        } => {
            draft.shape = Some(Shape::Box);
            draft.width_cm = width_cm.to_string();
            draft.length_cm = length_cm.to_string();
            draft.height_cm = height_cm.to_string();
        }
    }
    draft
}

fn rental_draft(rental: &RentalRate) -> RentalDraft {
    match rental {
        RentalRate::Flat {
            base_days,
            price_per_day,
        } => RentalDraft {
            tiered: false,
            base_days: base_days.to_string(),
            price_per_day: price_per_day.amount().to_string(),
            tiers: vec![TierDraft::default()],
        },
        RentalRate::Tiered { tiers } => RentalDraft {
            tiered: true,
            base_days: "1".to_string(),
            price_per_day: String::new(),
            tiers: tiers
                .iter()
                .map(|tier| TierDraft {
                    end_day: tier.end_day.to_string(),
                    price: tier.price.amount().to_string(),
                })
                .collect(),
        },
    }
}

fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_i32(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    normalize_decimal(raw.trim()).parse().ok()
}

fn check_id(report: &mut ValidationReport, path: &str, raw: &str) {
    if raw.trim().is_empty() {
        report.push(path, "required");
    } else if parse_i32(raw).is_none_or(|id| id <= 0) {
        report.push(path, "must be a number");
    }
}

fn check_price(report: &mut ValidationReport, path: impl Into<String>, raw: &str) {
    if raw.trim().is_empty() {
        report.push(path, "required");
        return;
    }
    match Price::parse_input(raw) {
        Ok(_) => {}
        Err(arenda_core::PriceError::Negative) => report.push(path, "must not be negative"),
        Err(arenda_core::PriceError::NotANumber(_)) => report.push(path, "must be a number"),
    }
}

fn check_positive_decimal(report: &mut ValidationReport, path: &str, raw: &str) {
    if raw.trim().is_empty() {
        report.push(path, "required");
        return;
    }
    match parse_decimal(raw) {
        None => report.push(path, "must be a number"),
        Some(value) if value <= Decimal::ZERO => {
            report.push(path, "must be a positive number");
        }
        Some(_) => {}
    }
}

fn check_u32(report: &mut ValidationReport, path: &str, raw: &str) {
    if raw.trim().is_empty() {
        report.push(path, "required");
    } else if parse_u32(raw).is_none() {
        report.push(path, "must be a number");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        let mut form = ProductForm::create();
        form.name = "Стул".to_string();
        form.category_id = "1".to_string();
        form.price_rub = "100".to_string();
        form.set_shape(Shape::Line);
        form.dimensions.length_cm = "120".to_string();
        form.volume_m3 = "0,1".to_string();
        form.weight_kg = "5".to_string();
        form.rental.price_per_day = "100".to_string();
        form
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_form().validate().is_valid());
    }

    #[test]
    fn test_missing_identity_fields() {
        let form = ProductForm::create();
        let report = form.validate();
        assert_eq!(report.get("name"), Some("required"));
        assert_eq!(report.get("category_id"), Some("required"));
        assert_eq!(report.get("price_rub"), Some("required"));
        assert_eq!(report.get("dimensions.shape"), Some("required"));
    }

    #[test]
    fn test_shape_switch_clears_other_fields() {
        let mut form = valid_form();
        form.set_shape(Shape::Circle);
        assert_eq!(form.dimensions.length_cm, "");
        let report = form.validate();
        assert_eq!(report.get("dimensions.circle.diameter_cm"), Some("required"));
        assert!(report.get("dimensions.line.length_cm").is_none());
    }

    #[test]
    fn test_only_selected_shape_is_validated() {
        let mut form = valid_form();
        form.set_shape(Shape::Box);
        form.dimensions.width_cm = "40".to_string();
        let report = form.validate();
        assert_eq!(report.get("dimensions.box.length_cm"), Some("required"));
        assert_eq!(report.get("dimensions.box.height_cm"), Some("required"));
        assert!(report.get("dimensions.box.width_cm").is_none());
    }

    #[test]
    fn test_tier_must_exceed_previous() {
        let mut form = valid_form();
        form.set_tiered(true);
        form.rental.tiers = vec![
            TierDraft {
                end_day: "5".to_string(),
                price: "100".to_string(),
            },
            TierDraft {
                end_day: "5".to_string(),
                price: "80".to_string(),
            },
        ];
        let report = form.validate();
        assert_eq!(
            report.get("rental.tiers.1.end_day"),
            Some("must be greater than previous")
        );
    }

    #[test]
    fn test_first_tier_minimum_end_day() {
        let mut form = valid_form();
        form.set_tiered(true);
        form.rental.tiers = vec![TierDraft {
            end_day: "1".to_string(),
            price: "100".to_string(),
        }];
        let report = form.validate();
        assert_eq!(report.get("rental.tiers.0.end_day"), Some("must be at least 2"));
    }

    #[test]
    fn test_add_tier_caps_at_limit() {
        let mut form = valid_form();
        form.set_tiered(true);
        form.add_tier();
        form.add_tier();
        form.add_tier();
        assert_eq!(form.rental.tiers.len(), MAX_TIERS);
    }

    #[test]
    fn test_show_on_site_requires_an_image() {
        let mut form = valid_form();
        form.visibility.show_on_site = true;
        let report = form.validate();
        assert_eq!(
            report.get("images"),
            Some("at least one image is required to show on site")
        );

        form.images.add_local("a.jpg", vec![1]);
        assert!(form.validate().is_valid());
    }

    #[test]
    fn test_to_input_normalizes_decimal_comma() {
        let form = valid_form();
        let input = form.to_input().expect("valid");
        assert_eq!(input.delivery.volume_m3, Decimal::new(1, 1));
        assert_eq!(input.price_rub, Price::from_rub(100));
        assert_eq!(
            input.dimensions,
            Dimensions::Line {
                length_cm: Decimal::from(120)
            }
        );
    }

    #[test]
    fn test_invalid_seats_rejected() {
        let mut form = valid_form();
        form.seats = "0".to_string();
        assert_eq!(
            form.validate().get("seats"),
            Some("must be a positive integer")
        );
        form.seats = String::new();
        assert!(form.validate().is_valid());
    }
}
