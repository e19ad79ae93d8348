//! Typed repositories on top of the document store.

pub mod listing_repo;

pub use listing_repo::{ListingRepo, SearchParams};
