//! Car listing wizard step definitions.
//!
//! The wizard has six ordered form steps followed by a review stage. Step
//! order is fixed. Step 1 creates the draft; every later step writes one
//! sub-record scoped by the draft id produced by step 1.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The six form steps of the listing wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    BasicInfo,
    Specifications,
    Features,
    Ownership,
    Pricing,
    Photos,
}

/// Total number of form steps.
pub const TOTAL_STEPS: u8 = 6;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 6;

/// Collection holding the listing document itself (and its basic info).
pub const LISTINGS_COLLECTION: &str = "listings";

impl WizardStep {
    /// All steps in wizard order.
    pub const ALL: [WizardStep; 6] = [
        Self::BasicInfo,
        Self::Specifications,
        Self::Features,
        Self::Ownership,
        Self::Pricing,
        Self::Photos,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::BasicInfo),
            2 => Ok(Self::Specifications),
            3 => Ok(Self::Features),
            4 => Ok(Self::Ownership),
            5 => Ok(Self::Pricing),
            6 => Ok(Self::Photos),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Specifications => 2,
            Self::Features => 3,
            Self::Ownership => 4,
            Self::Pricing => 5,
            Self::Photos => 6,
        }
    }

    /// URL slug used by the step routes.
    pub fn slug(self) -> &'static str {
        match self {
            Self::BasicInfo => "basic-info",
            Self::Specifications => "specifications",
            Self::Features => "features",
            Self::Ownership => "ownership",
            Self::Pricing => "pricing",
            Self::Photos => "photos",
        }
    }

    /// Parse a step from its URL slug or its 1-based number.
    pub fn from_slug(slug: &str) -> Result<Self, CoreError> {
        if let Ok(n) = slug.parse::<u8>() {
            return Self::from_number(n);
        }
        Self::ALL
            .into_iter()
            .find(|step| step.slug() == slug)
            .ok_or_else(|| CoreError::Validation(format!("Unknown wizard step '{slug}'")))
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Specifications => "Specifications",
            Self::Features => "Features",
            Self::Ownership => "Ownership & Documents",
            Self::Pricing => "Pricing & Payment",
            Self::Photos => "Photos",
        }
    }

    /// Fields the step's form must supply.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::BasicInfo => &["make", "model", "year"],
            Self::Specifications => &["fuel_type", "transmission"],
            Self::Features => &["features"],
            Self::Ownership => &["vin"],
            Self::Pricing => &["price"],
            Self::Photos => &["photos"],
        }
    }

    /// Collection the step writes to.
    ///
    /// Basic info lives on the listing document itself; every other step owns
    /// a sub-record collection keyed by `listing_id`.
    pub fn collection(self) -> &'static str {
        match self {
            Self::BasicInfo => LISTINGS_COLLECTION,
            Self::Specifications => "listing_specifications",
            Self::Features => "listing_features",
            Self::Ownership => "listing_ownership",
            Self::Pricing => "listing_pricing",
            Self::Photos => "listing_photos",
        }
    }

    /// Whether entering this step requires an existing draft id.
    pub fn requires_draft(self) -> bool {
        self != Self::BasicInfo
    }

    /// The step after this one, or `None` when the next stop is the review stage.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.to_number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    /// Steps that own a separate sub-record collection (everything but basic info).
    pub fn sub_record_steps() -> impl Iterator<Item = WizardStep> {
        Self::ALL.into_iter().filter(|s| s.requires_draft())
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Step definition view
// ---------------------------------------------------------------------------

/// Static description of a step, served to clients building the wizard UI.
#[derive(Debug, Clone, Serialize)]
pub struct StepDefinition {
    pub index: u8,
    pub step: WizardStep,
    pub slug: &'static str,
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
    pub requires_draft: bool,
}

impl From<WizardStep> for StepDefinition {
    fn from(step: WizardStep) -> Self {
        Self {
            index: step.to_number(),
            step,
            slug: step.slug(),
            label: step.label(),
            required_fields: step.required_fields(),
            requires_draft: step.requires_draft(),
        }
    }
}

/// All step definitions in wizard order.
pub fn step_definitions() -> Vec<StepDefinition> {
    WizardStep::ALL.into_iter().map(StepDefinition::from).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_from_number_valid() {
        assert_eq!(WizardStep::from_number(1).unwrap(), WizardStep::BasicInfo);
        assert_eq!(WizardStep::from_number(3).unwrap(), WizardStep::Features);
        assert_eq!(WizardStep::from_number(6).unwrap(), WizardStep::Photos);
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(7).is_err());
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
        assert_eq!(WizardStep::ALL.len(), TOTAL_STEPS as usize);
    }

    #[test]
    fn slugs_parse_back() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_slug(step.slug()).unwrap(), step);
        }
        assert_eq!(WizardStep::from_slug("4").unwrap(), WizardStep::Ownership);
        assert!(WizardStep::from_slug("review").is_err());
        assert!(WizardStep::from_slug("9").is_err());
    }

    #[test]
    fn serde_matches_slug() {
        for step in WizardStep::ALL {
            let json = serde_json::to_value(step).unwrap();
            assert_eq!(json, step.slug());
        }
    }

    #[test]
    fn only_first_step_may_run_without_draft() {
        assert!(!WizardStep::BasicInfo.requires_draft());
        for step in WizardStep::ALL.into_iter().skip(1) {
            assert!(step.requires_draft());
        }
    }

    #[test]
    fn next_and_previous_walk_the_order() {
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::Specifications));
        assert_eq!(WizardStep::Pricing.next(), Some(WizardStep::Photos));
        assert_eq!(WizardStep::Photos.next(), None);
        assert_eq!(WizardStep::BasicInfo.previous(), None);
        assert_eq!(WizardStep::Features.previous(), Some(WizardStep::Specifications));
    }

    #[test]
    fn sub_record_collections_are_distinct() {
        let collections: std::collections::HashSet<_> =
            WizardStep::ALL.iter().map(|s| s.collection()).collect();
        assert_eq!(collections.len(), WizardStep::ALL.len());
        assert_eq!(WizardStep::sub_record_steps().count(), 5);
    }

    #[test]
    fn step_definitions_are_ordered() {
        let defs = step_definitions();
        let indexes: Vec<u8> = defs.iter().map(|d| d.index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4, 5, 6]);
        assert!(defs.iter().all(|d| !d.label.is_empty()));
        assert!(defs.iter().all(|d| !d.required_fields.is_empty()));
    }
}
