//! Arenda Admin - back-office client.
//!
//! Headless client for the administrative side of the rental business:
//!
//! - [`api`] - typed REST client for products, product groups, customers,
//!   orders, images, and stock transactions; every mutation invalidates the
//!   affected list queries before it is reported complete
//! - [`forms`] - the multi-step product form: draft state, pure derived
//!   validation, numeric input masking, and image upload/reorder
//!   orchestration
//! - [`stock`] - the stock transaction ledger with optimistic counters
//!
//! All operations require an admin bearer token.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod forms;
pub mod stock;

pub use api::{AdminApi, AdminClient};
pub use config::{AdminConfig, ConfigError};
