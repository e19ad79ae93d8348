//! Step submission: validate, persist one sub-record, report the next step.

use serde::Serialize;

use motorlist_core::draft_session::DraftSession;
use motorlist_core::listing::ListingOwner;
use motorlist_core::listing_wizard::WizardStep;
use motorlist_core::step_input::{parse_form, StepInput};
use motorlist_db::repositories::ListingRepo;
use motorlist_db::DocumentStore;

use crate::error::WizardError;
use crate::fetch::fetch_draft;
use crate::gate::{enter_step, StepRedirect};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub draft_id: String,
    pub step: WizardStep,
    /// `None` after the last step: continue to review.
    pub next_step: Option<WizardStep>,
}

impl StepOutcome {
    fn new(draft_id: String, step: WizardStep) -> Self {
        Self {
            draft_id,
            step,
            next_step: step.next(),
        }
    }
}

/// Gate, decode and submit a raw request body for `step`.
///
/// The gate runs before the body is read, so a later step without a draft
/// is redirected whatever bytes it carries.
pub async fn submit_body(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    step: WizardStep,
    body: &[u8],
) -> Result<StepOutcome, WizardError> {
    enter_step(session, step)?;
    let form = parse_form(body)?;
    submit_form(store, session, owner, step, form).await
}

/// Gate, parse and submit a decoded form value for `step`. A later step
/// without a draft is redirected whatever the value holds.
pub async fn submit_form(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    step: WizardStep,
    form: serde_json::Value,
) -> Result<StepOutcome, WizardError> {
    enter_step(session, step)?;
    let input = StepInput::prepare(step, form)?;
    submit_step(store, session, owner, input).await
}

/// Persist one step.
///
/// Without a draft, basic info creates one and points the session at it;
/// any other step is redirected to basic info. With a draft, the listing
/// must exist, belong to `owner` and still be a draft; the step's
/// sub-record is then created or overwritten and the session snapshot is
/// updated to match.
pub async fn submit_step(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    input: StepInput,
) -> Result<StepOutcome, WizardError> {
    let step = input.step();
    let Some(draft_id) = enter_step(session, step)? else {
        return create_draft(store, session, owner, input).await;
    };

    input.validate()?;

    let mut listing = match fetch_draft(store, owner, &draft_id).await {
        Ok(listing) => listing,
        Err(e) => {
            if matches!(e, WizardError::NotFound { .. }) {
                session.clear();
            }
            return Err(e);
        }
    };
    if !listing.status.is_editable() {
        return Err(WizardError::NotEditable {
            id: draft_id,
            status: listing.status,
        });
    }

    if !ListingRepo::write_sub_record(store, &draft_id, &input).await? {
        session.clear();
        return Err(WizardError::not_found(&draft_id));
    }

    listing.apply(&input);
    listing.updated_at = chrono::Utc::now();
    session.set_cached_snapshot(listing);

    tracing::info!(
        draft_id = %draft_id,
        step = %step,
        owner = %owner.business_profile_id,
        "Listing step saved"
    );

    Ok(StepOutcome::new(draft_id, step))
}

async fn create_draft(
    store: &dyn DocumentStore,
    session: &mut DraftSession,
    owner: &ListingOwner,
    input: StepInput,
) -> Result<StepOutcome, WizardError> {
    let StepInput::BasicInfo(basic_info) = &input else {
        // enter_step only yields no draft for step 1.
        return Err(StepRedirect::to_basic_info(input.step().label()).into());
    };
    input.validate()?;

    let listing = ListingRepo::create_draft(store, owner, basic_info).await?;
    let draft_id = listing.id.clone();
    session.set_cached_snapshot(listing);

    tracing::info!(
        draft_id = %draft_id,
        dealer_id = %owner.dealer_id,
        owner = %owner.business_profile_id,
        "Listing draft created"
    );

    Ok(StepOutcome::new(draft_id, WizardStep::BasicInfo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use motorlist_core::listing_status::ListingStatus;
    use motorlist_db::MemoryDocumentStore;
    use serde_json::json;

    fn owner() -> ListingOwner {
        ListingOwner {
            dealer_id: "dealer-1".into(),
            business_profile_id: "profile-1".into(),
        }
    }

    async fn start(store: &MemoryDocumentStore, session: &mut DraftSession) -> String {
        submit_form(
            store,
            session,
            &owner(),
            WizardStep::BasicInfo,
            json!({ "make": "Toyota", "model": "Corolla", "year": 2022 }),
        )
        .await
        .unwrap()
        .draft_id
    }

    #[tokio::test]
    async fn first_step_creates_draft_and_sets_pointer() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();

        let id = start(&store, &mut session).await;

        assert!(!id.is_empty());
        assert_eq!(session.draft_id(), Some(id.as_str()));
        let cached = session.cached_snapshot().unwrap();
        assert_eq!(cached.status, ListingStatus::Draft);
        assert_eq!(cached.basic_info.make, "Toyota");
    }

    #[tokio::test]
    async fn invalid_input_writes_nothing() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();

        let result = submit_form(
            &store,
            &mut session,
            &owner(),
            WizardStep::BasicInfo,
            json!({ "make": "Toyota", "year": 1800 }),
        )
        .await;

        assert_matches!(result, Err(WizardError::Validation(ref f)) if f.contains("model") && f.contains("year"));
        assert_eq!(store.write_count(), 0);
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn later_step_without_draft_redirects_and_writes_nothing() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();

        let result = submit_form(
            &store,
            &mut session,
            &owner(),
            WizardStep::Features,
            json!({ "features": ["abs"] }),
        )
        .await;

        assert_matches!(result, Err(WizardError::Redirect(r)) if r.to == WizardStep::BasicInfo);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn unreadable_body_is_redirected_before_parsing() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();

        for body in [&b"{ not json"[..], b""] {
            let result =
                submit_body(&store, &mut session, &owner(), WizardStep::Features, body).await;
            assert_matches!(result, Err(WizardError::Redirect(r)) if r.to == WizardStep::BasicInfo);
        }
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn unreadable_body_with_draft_is_a_form_error() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();
        start(&store, &mut session).await;
        let writes = store.write_count();

        let result =
            submit_body(&store, &mut session, &owner(), WizardStep::Pricing, b"{ not json").await;

        assert_matches!(result, Err(WizardError::Validation(ref f)) if f.contains("_form"));
        assert_eq!(store.write_count(), writes);
    }

    #[tokio::test]
    async fn resubmitting_basic_info_updates_in_place() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();
        let id = start(&store, &mut session).await;

        let outcome = submit_form(
            &store,
            &mut session,
            &owner(),
            WizardStep::BasicInfo,
            json!({ "make": "Toyota", "model": "Corolla Cross", "year": 2023 }),
        )
        .await
        .unwrap();

        assert_eq!(outcome.draft_id, id);
        assert_eq!(store.len("listings").await, 1);
        assert_eq!(session.cached_snapshot().unwrap().basic_info.year, 2023);
    }

    #[tokio::test]
    async fn photos_step_points_at_review() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();
        start(&store, &mut session).await;

        let outcome = submit_form(
            &store,
            &mut session,
            &owner(),
            WizardStep::Photos,
            json!({ "photos": [{ "url": "https://cdn.example.com/1.jpg" }] }),
        )
        .await
        .unwrap();
        assert_eq!(outcome.step, WizardStep::Photos);
        assert_eq!(outcome.next_step, None);
    }

    #[tokio::test]
    async fn non_draft_listing_is_not_editable() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();
        let id = start(&store, &mut session).await;
        ListingRepo::set_status(&store, &id, ListingStatus::UnderReview, None)
            .await
            .unwrap();
        let writes = store.write_count();

        let result = submit_form(
            &store,
            &mut session,
            &owner(),
            WizardStep::Pricing,
            json!({ "price": 15000 }),
        )
        .await;

        assert_matches!(
            result,
            Err(WizardError::NotEditable { status: ListingStatus::UnderReview, .. })
        );
        assert_eq!(store.write_count(), writes);
    }

    #[tokio::test]
    async fn another_profile_cannot_write() {
        let store = MemoryDocumentStore::new();
        let mut session = DraftSession::new();
        let id = start(&store, &mut session).await;
        let intruder = ListingOwner {
            dealer_id: "dealer-2".into(),
            business_profile_id: "profile-2".into(),
        };
        let mut intruder_session = DraftSession::for_draft(id);
        let writes = store.write_count();

        let result = submit_form(
            &store,
            &mut intruder_session,
            &intruder,
            WizardStep::Pricing,
            json!({ "price": 1 }),
        )
        .await;

        assert_matches!(result, Err(WizardError::NotFound { .. }));
        assert_eq!(store.write_count(), writes);
        assert!(intruder_session.is_empty());
    }
}
