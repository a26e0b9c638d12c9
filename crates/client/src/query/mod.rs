//! Paginated query cache.
//!
//! Every list surface in the clients goes through the same machinery:
//!
//! - a [`QueryKey`] identifies a logical query by entity scope plus its
//!   filter/sort parameters, compared by value;
//! - an [`InfiniteQuery`] accumulates server pages into one growing,
//!   de-duplicated sequence, fetching pages strictly in order and never
//!   duplicating an in-flight request;
//! - a [`QueryStore`] shares `InfiniteQuery` instances process-wide for
//!   value-equal keys, with a bounded staleness window, and is invalidated
//!   by the mutation layer;
//! - a [`ScrollTrigger`] turns sentinel visibility transitions into
//!   at-most-one next-page request each.

mod infinite;
mod key;
mod scroll;
mod store;

pub use infinite::{FetchOutcome, FetchPage, InfiniteQuery, Keyed, Page, QuerySnapshot};
pub use key::QueryKey;
pub use scroll::ScrollTrigger;
pub use store::QueryStore;
