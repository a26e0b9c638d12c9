//! Arenda Core - Shared types library.
//!
//! This crate provides common types used across all Arenda client components:
//! - `storefront` - Public catalog, cart, and order-history client
//! - `admin` - Back-office client (products, groups, customers, stock)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no caches. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, statuses, and rental pricing schedules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
