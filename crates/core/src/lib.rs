//! Domain types and rules for the car listing marketplace.
//!
//! This crate has no I/O. It defines the listing status state machine, the
//! wizard step definitions, the per-step input schemas with their
//! validation, the feature catalog, and the explicit draft session context
//! that the workflow in `motorlist-wizard` threads through every call.

pub mod draft_session;
pub mod error;
pub mod feature_catalog;
pub mod field_errors;
pub mod hashing;
pub mod listing;
pub mod listing_status;
pub mod listing_wizard;
pub mod search;
pub mod step_input;
pub mod types;
