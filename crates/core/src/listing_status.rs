//! Listing status state machine.
//!
//! ```text
//! draft --(all wizard steps complete)--> under_review --(moderation)--> published
//!                                                     \-(moderation)--> rejected
//! ```
//!
//! `published` and `rejected` are terminal as far as the wizard is
//! concerned. Moderation itself happens outside this service.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status values for a car listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    UnderReview,
    Published,
    Rejected,
}

impl ListingStatus {
    /// Parse a status string as stored in listing documents.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "under_review" => Ok(Self::UnderReview),
            "published" => Ok(Self::Published),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing status '{s}'. Must be one of: draft, under_review, published, rejected"
            ))),
        }
    }

    /// Convert to the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderReview => "under_review",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the wizard may still write sub-records for a listing in this status.
    pub fn is_editable(self) -> bool {
        self == Self::Draft
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Published | Self::Rejected)
    }

    /// Whether `self -> next` is one of the permitted transitions.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::UnderReview)
                | (Self::UnderReview, Self::Published)
                | (Self::UnderReview, Self::Rejected)
        )
    }

    /// Validate a status transition.
    pub fn validate_transition(self, next: Self) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Cannot move listing from '{}' to '{}'",
                self.as_str(),
                next.as_str()
            )))
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL: [ListingStatus; 4] = [
        ListingStatus::Draft,
        ListingStatus::UnderReview,
        ListingStatus::Published,
        ListingStatus::Rejected,
    ];

    #[test]
    fn status_from_str_valid() {
        for status in ALL {
            assert_eq!(ListingStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_from_str_invalid() {
        assert!(ListingStatus::from_str_db("submitted").is_err());
        assert!(ListingStatus::from_str_db("").is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ListingStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }

    #[test]
    fn only_drafts_are_editable() {
        assert!(ListingStatus::Draft.is_editable());
        assert!(!ListingStatus::UnderReview.is_editable());
        assert!(!ListingStatus::Published.is_editable());
        assert!(!ListingStatus::Rejected.is_editable());
    }

    #[test]
    fn permitted_transitions() {
        assert!(ListingStatus::Draft.can_transition_to(ListingStatus::UnderReview));
        assert!(ListingStatus::UnderReview.can_transition_to(ListingStatus::Published));
        assert!(ListingStatus::UnderReview.can_transition_to(ListingStatus::Rejected));
    }

    #[test]
    fn every_other_transition_is_rejected() {
        let allowed = [
            (ListingStatus::Draft, ListingStatus::UnderReview),
            (ListingStatus::UnderReview, ListingStatus::Published),
            (ListingStatus::UnderReview, ListingStatus::Rejected),
        ];
        for from in ALL {
            for to in ALL {
                if allowed.contains(&(from, to)) {
                    continue;
                }
                assert_matches!(from.validate_transition(to), Err(CoreError::Conflict(_)));
            }
        }
    }

    #[test]
    fn terminal_states() {
        assert!(ListingStatus::Published.is_terminal());
        assert!(ListingStatus::Rejected.is_terminal());
        assert!(!ListingStatus::Draft.is_terminal());
        assert!(!ListingStatus::UnderReview.is_terminal());
    }
}
