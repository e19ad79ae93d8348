//! Route definitions for the car listing wizard.
//!
//! Mounted at `/listing-wizard` by `api_routes()`.
//!
//! ```text
//! GET    /steps                 list_steps
//! GET    /feature-catalog       feature_catalog
//! GET    /steps/{step}          get_step (?draft_id)
//! POST   /steps/{step}          submit_step (?draft_id)
//! GET    /review                review (?draft_id)
//! POST   /finalize              finalize (?draft_id)
//! POST   /abandon               abandon
//! POST   /photos                upload_photo (multipart)
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use motorlist_core::listing_wizard::WizardStep;

use crate::handlers::listing_wizard;
use crate::state::AppState;

/// Absolute path of the wizard routes.
pub const WIZARD_BASE_PATH: &str = "/api/v1/listing-wizard";

/// Headroom over the photo size limit for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Absolute path of a step's route, used for redirects.
pub fn step_path(step: WizardStep) -> String {
    format!("{WIZARD_BASE_PATH}/steps/{}", step.slug())
}

/// Listing wizard routes -- mounted at `/listing-wizard`.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/steps", get(listing_wizard::list_steps))
        .route("/feature-catalog", get(listing_wizard::feature_catalog))
        .route(
            "/steps/{step}",
            get(listing_wizard::get_step).post(listing_wizard::submit_step),
        )
        .route("/review", get(listing_wizard::review))
        .route("/finalize", post(listing_wizard::finalize))
        .route("/abandon", post(listing_wizard::abandon))
        .route(
            "/photos",
            post(listing_wizard::upload_photo).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
}
