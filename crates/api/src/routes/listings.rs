//! Route definitions for browsing listings.
//!
//! Mounted at `/listings` by `api_routes()`.
//!
//! ```text
//! GET    /                      search (?make, model, limit, offset)
//! GET    /mine                  mine (dealer dashboard)
//! GET    /{id}                  get_listing
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Listing routes -- mounted at `/listings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::search))
        .route("/mine", get(listings::mine))
        .route("/{id}", get(listings::get_listing))
}
