//! Core types for Arenda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod rental;
pub mod status;

pub use id::*;
pub use price::{Price, PriceError};
pub use rental::{MAX_TIERS, RentalRate, RentalTier, rental_days};
pub use status::*;
