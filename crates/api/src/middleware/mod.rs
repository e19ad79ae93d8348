//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated operator from a JWT Bearer token.
//! - [`rbac::RequireDealer`] -- Requires a token that carries a business profile.

pub mod auth;
pub mod rbac;
