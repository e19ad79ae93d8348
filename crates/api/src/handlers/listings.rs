//! Handlers for browsing published listings and the dealer dashboard.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use motorlist_core::error::CoreError;
use motorlist_core::listing::DraftListing;
use motorlist_core::listing_status::ListingStatus;
use motorlist_core::listing_wizard::WizardStep;
use motorlist_core::search::{clamp_limit, clamp_offset, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use motorlist_core::types::Timestamp;
use motorlist_db::repositories::{ListingRepo, SearchParams};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireDealer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters / views
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Card-sized view of a listing, used by search results and the dashboard.
#[derive(Debug, Serialize)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub status: ListingStatus,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub cover_photo: Option<String>,
    pub completed_steps: Vec<WizardStep>,
    pub missing_steps: Vec<WizardStep>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub submitted_at: Option<Timestamp>,
}

impl From<&DraftListing> for ListingSummary {
    fn from(listing: &DraftListing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title(),
            status: listing.status,
            make: listing.basic_info.make.clone(),
            model: listing.basic_info.model.clone(),
            year: listing.basic_info.year,
            price: listing.pricing.as_ref().map(|p| p.price),
            currency: listing.pricing.as_ref().map(|p| p.currency.clone()),
            cover_photo: listing
                .photos
                .as_ref()
                .and_then(|p| p.cover())
                .map(|p| p.url.clone()),
            completed_steps: listing.completed_steps(),
            missing_steps: listing.missing_steps(),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            submitted_at: listing.submitted_at,
        }
    }
}

fn summaries(listings: &[DraftListing]) -> Vec<ListingSummary> {
    listings.iter().map(ListingSummary::from).collect()
}

// ---------------------------------------------------------------------------
// GET /listings
// ---------------------------------------------------------------------------

/// Published listings, newest first, filtered by make/model (case-insensitive).
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let params = SearchParams {
        make: query.make,
        model: query.model,
        limit: clamp_limit(query.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT),
        offset: clamp_offset(query.offset),
    };
    let listings = ListingRepo::search_published(&*state.store, &params).await?;
    Ok(Json(DataResponse {
        data: summaries(&listings),
    }))
}

// ---------------------------------------------------------------------------
// GET /listings/mine
// ---------------------------------------------------------------------------

/// Every listing of the caller's business profile, in any status.
pub async fn mine(
    State(state): State<AppState>,
    dealer: RequireDealer,
) -> AppResult<impl IntoResponse> {
    let listings =
        ListingRepo::list_by_profile(&*state.store, &dealer.owner.business_profile_id).await?;
    Ok(Json(DataResponse {
        data: summaries(&listings),
    }))
}

// ---------------------------------------------------------------------------
// GET /listings/{id}
// ---------------------------------------------------------------------------

/// A published listing with all of its sub-records.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::fetch(&*state.store, &id)
        .await?
        .filter(|l| l.status == ListingStatus::Published)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Listing",
                id: id.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: listing }))
}
