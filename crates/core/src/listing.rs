//! The assembled car listing: the listing document plus its sub-records.

use serde::{Deserialize, Serialize};

use crate::listing_status::ListingStatus;
use crate::listing_wizard::WizardStep;
use crate::step_input::{
    BasicInfo, FeatureSelection, Ownership, PhotoSet, Pricing, Specifications, StepInput,
};
use crate::types::{DocumentId, Timestamp};

/// Who a listing belongs to, as supplied by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOwner {
    /// The operator (dealer staff account) acting on the listing.
    pub dealer_id: String,
    /// The dealer's business profile; listings are scoped to this.
    pub business_profile_id: String,
}

/// A listing with every sub-record resolved. Steps not yet completed are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftListing {
    pub id: DocumentId,
    pub status: ListingStatus,
    pub dealer_id: String,
    pub business_profile_id: String,
    pub basic_info: BasicInfo,
    pub specifications: Option<Specifications>,
    pub features: Option<FeatureSelection>,
    pub ownership: Option<Ownership>,
    pub pricing: Option<Pricing>,
    pub photos: Option<PhotoSet>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub submitted_at: Option<Timestamp>,
}

impl DraftListing {
    pub fn is_owned_by(&self, owner: &ListingOwner) -> bool {
        self.business_profile_id == owner.business_profile_id
    }

    /// Whether the sub-record for `step` is present.
    pub fn has_step(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::BasicInfo => true,
            WizardStep::Specifications => self.specifications.is_some(),
            WizardStep::Features => self.features.is_some(),
            WizardStep::Ownership => self.ownership.is_some(),
            WizardStep::Pricing => self.pricing.is_some(),
            WizardStep::Photos => self.photos.is_some(),
        }
    }

    /// Steps whose sub-record is missing, in wizard order.
    pub fn missing_steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|s| !self.has_step(*s))
            .collect()
    }

    pub fn completed_steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|s| self.has_step(*s))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        WizardStep::ALL.into_iter().all(|s| self.has_step(s))
    }

    /// The stored sub-record for `step` as JSON, for pre-filling a form.
    pub fn step_data(&self, step: WizardStep) -> Option<serde_json::Value> {
        match step {
            WizardStep::BasicInfo => to_json(&self.basic_info),
            WizardStep::Specifications => self.specifications.as_ref().and_then(to_json),
            WizardStep::Features => self.features.as_ref().and_then(to_json),
            WizardStep::Ownership => self.ownership.as_ref().and_then(to_json),
            WizardStep::Pricing => self.pricing.as_ref().and_then(to_json),
            WizardStep::Photos => self.photos.as_ref().and_then(to_json),
        }
    }

    /// Apply a freshly written sub-record, keeping a cached copy in step with the store.
    pub fn apply(&mut self, input: &StepInput) {
        match input {
            StepInput::BasicInfo(v) => self.basic_info = v.clone(),
            StepInput::Specifications(v) => self.specifications = Some(v.clone()),
            StepInput::Features(v) => self.features = Some(v.clone()),
            StepInput::Ownership(v) => self.ownership = Some(v.clone()),
            StepInput::Pricing(v) => self.pricing = Some(v.clone()),
            StepInput::Photos(v) => self.photos = Some(v.clone()),
        }
    }

    /// Short display title, e.g. `2022 Toyota Corolla`.
    pub fn title(&self) -> String {
        let b = &self.basic_info;
        match &b.trim {
            Some(trim) => format!("{} {} {} {}", b.year, b.make, b.model, trim),
            None => format!("{} {} {}", b.year, b.make, b.model),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}
