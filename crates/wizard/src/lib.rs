//! The listing wizard workflow.
//!
//! Every operation takes the document store, the caller's [`DraftSession`]
//! and the [`ListingOwner`] from the auth context explicitly; nothing here
//! knows about HTTP. The pieces, leaves first:
//!
//! - [`gate`]: may a step be entered without a draft?
//! - [`fetch`]: load a listing with all sub-records, scoped to the owner.
//! - [`submit`]: validate and persist one step.
//! - [`review`]: aggregate, finalize, abandon.
//! - [`photos`]: photo uploads feeding the last step.
//!
//! [`DraftSession`]: motorlist_core::draft_session::DraftSession
//! [`ListingOwner`]: motorlist_core::listing::ListingOwner

pub mod error;
pub mod fetch;
pub mod gate;
pub mod photos;
pub mod review;
pub mod submit;

pub use error::WizardError;
pub use fetch::{fetch_draft, load_draft, prefill_step, resume_draft, StepForm};
pub use gate::{current_draft, enter_step, require_draft, StepRedirect};
pub use photos::{upload_photo, UploadedPhoto, ALLOWED_PHOTO_TYPES};
pub use review::{abandon, finalize, review, FinalizeOutcome, ReviewSummary};
pub use submit::{submit_body, submit_form, submit_step, StepOutcome};
