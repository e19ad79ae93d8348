//! Fetching a listing with all of its sub-records.

use serde::Serialize;

use motorlist_core::draft_session::DraftSession;
use motorlist_core::listing::{DraftListing, ListingOwner};
use motorlist_core::listing_wizard::{StepDefinition, WizardStep};
use motorlist_db::repositories::ListingRepo;
use motorlist_db::DocumentStore;

use crate::error::WizardError;
use crate::gate::enter_step;

/// Everything a client needs to render one step's form.
#[derive(Debug, Clone, Serialize)]
pub struct StepForm {
    pub definition: StepDefinition,
    pub draft_id: Option<String>,
    /// Previously submitted data for this step, if any.
    pub data: Option<serde_json::Value>,
    pub previous_step: Option<WizardStep>,
    pub next_step: Option<WizardStep>,
}

/// Load listing `id` and all sub-records, straight from the store.
///
/// A listing owned by another business profile is reported as not found.
pub async fn fetch_draft(
    store: &dyn DocumentStore,
    owner: &ListingOwner,
    id: &str,
) -> Result<DraftListing, WizardError> {
    let listing = ListingRepo::fetch(store, id)
        .await?
        .ok_or_else(|| WizardError::not_found(id))?;

    if !listing.is_owned_by(owner) {
        tracing::debug!(
            draft_id = %id,
            owner = %owner.business_profile_id,
            "Listing belongs to another business profile"
        );
        return Err(WizardError::not_found(id));
    }
    Ok(listing)
}

/// Read-through variant of [`fetch_draft`]: serves the session's cached
/// snapshot when it is for `id`, otherwise fetches and caches.
///
/// When the session points at a draft that no longer resolves, the pointer
/// is dropped.
pub async fn load_draft(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    id: &str,
) -> Result<DraftListing, WizardError> {
    if let Some(cached) = session.cached_snapshot() {
        if cached.id == id && cached.is_owned_by(owner) {
            return Ok(cached.clone());
        }
    }

    match fetch_draft(store, owner, id).await {
        Ok(listing) => {
            session.set_cached_snapshot(listing.clone());
            Ok(listing)
        }
        Err(e @ WizardError::NotFound { .. }) => {
            if session.draft_id() == Some(id) {
                tracing::info!(draft_id = %id, "Dropping session pointer to unknown draft");
                session.clear();
            }
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Point the session at an explicitly named draft (e.g. "continue editing"
/// from the dashboard). The draft must exist, belong to `owner` and still be
/// a draft; otherwise the session is left as it was.
pub async fn resume_draft(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    id: &str,
) -> Result<DraftListing, WizardError> {
    let listing = fetch_draft(store, owner, id).await?;
    if !listing.status.is_editable() {
        return Err(WizardError::NotEditable {
            id: listing.id,
            status: listing.status,
        });
    }
    if session.draft_id() != Some(id) {
        tracing::info!(draft_id = %id, owner = %owner.business_profile_id, "Draft resumed");
    }
    session.set_cached_snapshot(listing.clone());
    Ok(listing)
}

/// Gate `step` and pre-fill its form from the current draft.
pub async fn prefill_step(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    step: WizardStep,
) -> Result<StepForm, WizardError> {
    let draft_id = enter_step(session, step)?;
    let data = match &draft_id {
        Some(id) => load_draft(store, session, owner, id).await?.step_data(step),
        None => None,
    };
    Ok(StepForm {
        definition: StepDefinition::from(step),
        draft_id,
        data,
        previous_step: step.previous(),
        next_step: step.next(),
    })
}
