//! Review and finalize.

use serde::Serialize;

use motorlist_core::draft_session::DraftSession;
use motorlist_core::listing::{DraftListing, ListingOwner};
use motorlist_core::listing_status::ListingStatus;
use motorlist_core::listing_wizard::WizardStep;
use motorlist_core::types::Timestamp;
use motorlist_db::repositories::ListingRepo;
use motorlist_db::DocumentStore;

use crate::error::WizardError;
use crate::fetch::fetch_draft;

/// The aggregated draft as shown on the review page.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    pub listing: DraftListing,
    pub completed_steps: Vec<WizardStep>,
    pub missing_steps: Vec<WizardStep>,
    /// All steps present and the listing is still a draft.
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeOutcome {
    pub draft_id: String,
    pub status: ListingStatus,
    pub submitted_at: Timestamp,
}

/// Aggregate listing `id` for review. Always reads fresh and refreshes the
/// session snapshot.
pub async fn review(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    id: &str,
) -> Result<ReviewSummary, WizardError> {
    let listing = fetch_draft(store, owner, id).await?;
    let missing_steps = listing.missing_steps();
    let ready = missing_steps.is_empty() && listing.status.is_editable();
    session.set_cached_snapshot(listing.clone());

    Ok(ReviewSummary {
        completed_steps: listing.completed_steps(),
        missing_steps,
        ready,
        listing,
    })
}

/// Submit listing `id` for moderation: `draft -> under_review`.
///
/// Refuses with [`WizardError::IncompleteDraft`] while any step is missing,
/// leaving the status untouched. On success the session pointer is cleared.
pub async fn finalize(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    id: &str,
) -> Result<FinalizeOutcome, WizardError> {
    let listing = fetch_draft(store, owner, id).await?;

    let missing = listing.missing_steps();
    if !missing.is_empty() {
        tracing::info!(draft_id = %id, missing = missing.len(), "Finalize refused, draft incomplete");
        return Err(WizardError::IncompleteDraft { missing });
    }

    listing
        .status
        .validate_transition(ListingStatus::UnderReview)
        .map_err(WizardError::transition)?;

    let submitted_at = chrono::Utc::now();
    if !ListingRepo::set_status(store, id, ListingStatus::UnderReview, Some(submitted_at)).await? {
        return Err(WizardError::not_found(id));
    }

    if session.draft_id() == Some(id) {
        session.clear();
    }

    tracing::info!(
        draft_id = %id,
        owner = %owner.business_profile_id,
        title = %listing.title(),
        "Listing submitted for review"
    );

    Ok(FinalizeOutcome {
        draft_id: id.to_string(),
        status: ListingStatus::UnderReview,
        submitted_at,
    })
}

/// Forget the draft the session points at. The draft itself stays in the
/// store and can be resumed later. Returns the id that was dropped.
pub fn abandon(session: &mut DraftSession) -> Option<String> {
    let dropped = session.draft_id().map(str::to_string);
    session.clear();
    if let Some(id) = &dropped {
        tracing::info!(draft_id = %id, "Draft session abandoned");
    }
    dropped
}
