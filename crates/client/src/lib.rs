//! Arenda Client - shared REST plumbing for the storefront and admin crates.
//!
//! # Architecture
//!
//! - [`transport`] - reqwest-based HTTP/JSON transport with bearer auth
//! - [`error`] - the [`ApiError`] taxonomy shared by every remote call
//! - [`query`] - the paginated query cache: value-keyed, de-duplicating,
//!   invalidation-driven
//!
//! The backend is the source of truth - the client never persists anything
//! beyond an in-memory cache with a bounded TTL.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod query;
pub mod rest;
pub mod transport;

pub use error::{ApiError, ErrorPayload};
pub use query::{
    FetchOutcome, FetchPage, InfiniteQuery, Keyed, Page, QueryKey, QueryStore, ScrollTrigger,
};
pub use rest::RestPageFetcher;
pub use transport::HttpTransport;
