//! Product form state: draft, validation, masking, and images.

pub mod images;
pub mod input;
pub mod product;

pub use images::{ImageEntry, ImageList, ImageRef, LocalImage};
pub use input::{mask_decimal, mask_integer, normalize_decimal};
pub use product::{
    DimensionsDraft, FormMode, FormPhase, ProductForm, RentalDraft, Shape, SubmitError, TierDraft,
    ValidationReport,
};
