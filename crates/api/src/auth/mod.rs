//! Authentication primitives.
//!
//! Tokens are issued by the marketplace's auth service; this server only
//! validates them. [`jwt::generate_access_token`] exists for local tooling
//! and tests.

pub mod jwt;
