//! Handlers for the car listing wizard.
//!
//! Each handler loads the operator's session pointer from the registry,
//! runs one workflow operation, and stores the pointer back whether or not
//! the operation succeeded (a failed lookup may have cleared it).

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use motorlist_core::draft_session::DraftSession;
use motorlist_core::feature_catalog::FEATURE_CATALOG;
use motorlist_core::listing::ListingOwner;
use motorlist_core::listing_wizard::{step_definitions, WizardStep};
use motorlist_wizard::WizardError;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireDealer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional explicit draft id, used to resume a draft from the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DraftQuery {
    pub draft_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AbandonResponse {
    pub abandoned_draft_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_step(slug: &str) -> AppResult<WizardStep> {
    Ok(WizardStep::from_slug(slug)?)
}

/// Point the session at `?draft_id=` when one is given.
async fn apply_draft_param(
    state: &AppState,
    session: &mut DraftSession,
    owner: &ListingOwner,
    query: &DraftQuery,
) -> Result<(), WizardError> {
    if let Some(id) = query.draft_id.as_deref().filter(|id| !id.trim().is_empty()) {
        motorlist_wizard::resume_draft(&*state.store, session, owner, id).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /steps
// ---------------------------------------------------------------------------

/// Static step definitions, in wizard order.
pub async fn list_steps() -> impl IntoResponse {
    Json(DataResponse {
        data: step_definitions(),
    })
}

// ---------------------------------------------------------------------------
// GET /feature-catalog
// ---------------------------------------------------------------------------

pub async fn feature_catalog() -> impl IntoResponse {
    Json(DataResponse {
        data: FEATURE_CATALOG,
    })
}

// ---------------------------------------------------------------------------
// GET /steps/{step}
// ---------------------------------------------------------------------------

/// Enter a step: gate it and return previously saved data for pre-filling.
pub async fn get_step(
    State(state): State<AppState>,
    dealer: RequireDealer,
    Path(step): Path<String>,
    Query(query): Query<DraftQuery>,
) -> AppResult<impl IntoResponse> {
    let step = parse_step(&step)?;
    let operator = &dealer.user.user_id;
    let mut session = state.sessions.load(operator).await;

    let result = async {
        apply_draft_param(&state, &mut session, &dealer.owner, &query).await?;
        motorlist_wizard::prefill_step(&*state.store, &mut session, &dealer.owner, step).await
    }
    .await;

    state.sessions.store(operator, session).await;
    Ok(Json(DataResponse { data: result? }))
}

// ---------------------------------------------------------------------------
// POST /steps/{step}
// ---------------------------------------------------------------------------

/// Submit one step's form. Step 1 without a draft creates one (201).
///
/// The body is taken raw so the step gate answers before it is decoded.
pub async fn submit_step(
    State(state): State<AppState>,
    dealer: RequireDealer,
    Path(step): Path<String>,
    Query(query): Query<DraftQuery>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let step = parse_step(&step)?;
    let operator = &dealer.user.user_id;
    let mut session = state.sessions.load(operator).await;

    let result = async {
        apply_draft_param(&state, &mut session, &dealer.owner, &query).await?;
        let creating = session.is_empty() && step == WizardStep::BasicInfo;
        motorlist_wizard::submit_body(&*state.store, &mut session, &dealer.owner, step, &body)
            .await
            .map(|outcome| (creating, outcome))
    }
    .await;

    state.sessions.store(operator, session).await;
    let (creating, outcome) = result?;
    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: outcome })))
}

// ---------------------------------------------------------------------------
// GET /review
// ---------------------------------------------------------------------------

/// The aggregated draft with the list of steps still missing.
pub async fn review(
    State(state): State<AppState>,
    dealer: RequireDealer,
    Query(query): Query<DraftQuery>,
) -> AppResult<impl IntoResponse> {
    let operator = &dealer.user.user_id;
    let mut session = state.sessions.load(operator).await;

    let result = async {
        apply_draft_param(&state, &mut session, &dealer.owner, &query).await?;
        let id = motorlist_wizard::require_draft(&session, "Review")?;
        motorlist_wizard::review(&*state.store, &mut session, &dealer.owner, &id).await
    }
    .await;

    state.sessions.store(operator, session).await;
    Ok(Json(DataResponse { data: result? }))
}

// ---------------------------------------------------------------------------
// POST /finalize
// ---------------------------------------------------------------------------

/// Submit the draft for moderation.
pub async fn finalize(
    State(state): State<AppState>,
    dealer: RequireDealer,
    Query(query): Query<DraftQuery>,
) -> AppResult<impl IntoResponse> {
    let operator = &dealer.user.user_id;
    let mut session = state.sessions.load(operator).await;

    let result = async {
        apply_draft_param(&state, &mut session, &dealer.owner, &query).await?;
        let id = motorlist_wizard::require_draft(&session, "Finalize")?;
        motorlist_wizard::finalize(&*state.store, &mut session, &dealer.owner, &id).await
    }
    .await;

    state.sessions.store(operator, session).await;
    Ok(Json(DataResponse { data: result? }))
}

// ---------------------------------------------------------------------------
// POST /abandon
// ---------------------------------------------------------------------------

/// Drop the session pointer. The draft stays listed on the dashboard.
pub async fn abandon(State(state): State<AppState>, dealer: RequireDealer) -> impl IntoResponse {
    let operator = &dealer.user.user_id;
    let mut session = state.sessions.load(operator).await;
    let abandoned_draft_id = motorlist_wizard::abandon(&mut session);
    state.sessions.clear(operator).await;

    Json(DataResponse {
        data: AbandonResponse { abandoned_draft_id },
    })
}

// ---------------------------------------------------------------------------
// POST /photos
// ---------------------------------------------------------------------------

/// Upload one photo (multipart field `file`). Returns its public URL for the
/// photos step.
pub async fn upload_photo(
    State(state): State<AppState>,
    _dealer: RequireDealer,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let photo = motorlist_wizard::upload_photo(
            &*state.media,
            &content_type,
            bytes.to_vec(),
            state.config.media.max_upload_bytes,
        )
        .await?;
        return Ok((StatusCode::CREATED, Json(DataResponse { data: photo })));
    }

    Err(AppError::BadRequest("Missing multipart field 'file'".into()))
}
