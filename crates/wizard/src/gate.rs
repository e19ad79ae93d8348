//! Step gating.
//!
//! Step 1 is always open. Every later step, and the review stage, needs the
//! draft id produced by step 1; without one the caller is sent back to
//! step 1. The check is advisory: ownership is enforced on every read and
//! write, and finalize is the completeness guard.

use serde::Serialize;

use motorlist_core::draft_session::DraftSession;
use motorlist_core::listing_wizard::WizardStep;

/// Instruction to send the operator to another step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRedirect {
    pub to: WizardStep,
    pub notice: String,
}

impl StepRedirect {
    pub fn to_basic_info(stage: &str) -> Self {
        Self {
            to: WizardStep::BasicInfo,
            notice: format!(
                "No listing draft in progress. Start with '{}' before '{stage}'.",
                WizardStep::BasicInfo.label()
            ),
        }
    }
}

pub fn current_draft(session: &DraftSession) -> Option<String> {
    session.draft_id().map(str::to_string)
}

/// The draft id `stage` operates on, or a redirect to step 1.
pub fn require_draft(session: &DraftSession, stage: &str) -> Result<String, StepRedirect> {
    current_draft(session).ok_or_else(|| StepRedirect::to_basic_info(stage))
}

/// Gate for entering `step`. Yields the current draft id; step 1 may have none.
pub fn enter_step(session: &DraftSession, step: WizardStep) -> Result<Option<String>, StepRedirect> {
    if step.requires_draft() {
        require_draft(session, step.label()).map(Some)
    } else {
        Ok(current_draft(session))
    }
}
