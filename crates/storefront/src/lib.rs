//! Arenda Storefront - public catalog client.
//!
//! Headless client for the customer-facing side of the rental business:
//!
//! - [`api`] - catalog queries (products, product groups, new arrivals)
//!   backed by the shared paginated query cache
//! - [`cart`] - local cart state with rental-day pricing
//! - [`orders`] - customer order history
//!
//! Without a public token only the read endpoints are available; order
//! history requires one.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod orders;

pub use api::CatalogClient;
pub use config::{ConfigError, StorefrontConfig};
