pub mod health;
pub mod listing_wizard;
pub mod listings;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /listing-wizard/steps                 step definitions
/// /listing-wizard/feature-catalog       feature catalog
/// /listing-wizard/steps/{step}          pre-fill (GET), submit (POST)
/// /listing-wizard/review                aggregated draft (GET)
/// /listing-wizard/finalize              submit for moderation (POST)
/// /listing-wizard/abandon               drop the session pointer (POST)
/// /listing-wizard/photos                photo upload (POST, multipart)
///
/// /listings                             published listings (public)
/// /listings/mine                        dealer dashboard
/// /listings/{id}                        published listing detail (public)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest(
            "/listing-wizard",
            listing_wizard::router(config.media.max_upload_bytes),
        )
        .nest("/listings", listings::router())
}
