use motorlist_core::error::CoreError;
use motorlist_core::field_errors::FieldErrors;
use motorlist_core::listing_status::ListingStatus;
use motorlist_core::listing_wizard::WizardStep;
use motorlist_core::types::DocumentId;
use motorlist_db::{MediaError, StoreError};

use crate::gate::StepRedirect;

/// Everything a wizard operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Listing not found: {id}")]
    NotFound { id: DocumentId },

    #[error("Listing is incomplete, missing: {}", step_list(.missing))]
    IncompleteDraft { missing: Vec<WizardStep> },

    #[error("{}", .0.notice)]
    Redirect(StepRedirect),

    #[error("Listing {id} is {status} and can no longer be edited")]
    NotEditable { id: DocumentId, status: ListingStatus },

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Media store error: {0}")]
    Media(#[from] MediaError),
}

impl From<FieldErrors> for WizardError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<StepRedirect> for WizardError {
    fn from(redirect: StepRedirect) -> Self {
        Self::Redirect(redirect)
    }
}

impl WizardError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Only `Conflict` is expected from a transition check; anything else is kept verbatim.
    pub(crate) fn transition(err: CoreError) -> Self {
        match err {
            CoreError::Conflict(msg) => Self::InvalidTransition(msg),
            other => Self::InvalidTransition(other.to_string()),
        }
    }
}

fn step_list(steps: &[WizardStep]) -> String {
    steps
        .iter()
        .map(|s| s.slug())
        .collect::<Vec<_>>()
        .join(", ")
}
