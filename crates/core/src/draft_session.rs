//! The session pointer: which draft an operator is currently editing.
//!
//! A `DraftSession` is a plain value passed into every wizard call. It holds
//! the draft id produced by step 1 and, optionally, the last listing
//! snapshot fetched for that id so consecutive steps do not refetch it. It
//! performs no I/O; where it is kept between requests is the caller's
//! business.

use serde::{Deserialize, Serialize};

use crate::listing::DraftListing;
use crate::types::DocumentId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftSession {
    draft_id: Option<DocumentId>,
    snapshot: Option<DraftListing>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known draft id (e.g. resuming from the dealer dashboard).
    pub fn for_draft(id: impl Into<DocumentId>) -> Self {
        let mut session = Self::new();
        session.set_draft_id(id);
        session
    }

    pub fn draft_id(&self) -> Option<&str> {
        self.draft_id.as_deref()
    }

    /// Point the session at `id`. A snapshot cached for another draft is dropped.
    pub fn set_draft_id(&mut self, id: impl Into<DocumentId>) {
        let id = id.into();
        if self.snapshot.as_ref().is_some_and(|s| s.id != id) {
            self.snapshot = None;
        }
        self.draft_id = Some(id);
    }

    /// The cached listing, if it belongs to the current draft.
    pub fn cached_snapshot(&self) -> Option<&DraftListing> {
        match (&self.draft_id, &self.snapshot) {
            (Some(id), Some(snapshot)) if snapshot.id == *id => Some(snapshot),
            _ => None,
        }
    }

    pub fn cached_snapshot_mut(&mut self) -> Option<&mut DraftListing> {
        let id = self.draft_id.clone()?;
        self.snapshot.as_mut().filter(|s| s.id == id)
    }

    /// Cache `listing`. Also points the session at it.
    pub fn set_cached_snapshot(&mut self, listing: DraftListing) {
        self.draft_id = Some(listing.id.clone());
        self.snapshot = Some(listing);
    }

    pub fn invalidate_snapshot(&mut self) {
        self.snapshot = None;
    }

    /// Forget the draft and its snapshot.
    pub fn clear(&mut self) {
        self.draft_id = None;
        self.snapshot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.draft_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::fixtures::draft;

    #[test]
    fn new_session_has_no_draft() {
        let session = DraftSession::new();
        assert!(session.draft_id().is_none());
        assert!(session.cached_snapshot().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn set_and_clear() {
        let mut session = DraftSession::new();
        session.set_draft_id("listing-1");
        assert_eq!(session.draft_id(), Some("listing-1"));

        session.set_cached_snapshot(draft());
        assert!(session.cached_snapshot().is_some());

        session.clear();
        assert!(session.draft_id().is_none());
        assert!(session.cached_snapshot().is_none());
    }

    #[test]
    fn switching_drafts_drops_stale_snapshot() {
        let mut session = DraftSession::new();
        session.set_cached_snapshot(draft());
        session.set_draft_id("listing-2");
        assert!(session.cached_snapshot().is_none());
        assert_eq!(session.draft_id(), Some("listing-2"));
    }

    #[test]
    fn same_draft_keeps_snapshot() {
        let mut session = DraftSession::for_draft("listing-1");
        session.set_cached_snapshot(draft());
        session.set_draft_id("listing-1");
        assert!(session.cached_snapshot().is_some());
    }

    #[test]
    fn snapshot_can_be_updated_in_place() {
        let mut session = DraftSession::new();
        session.set_cached_snapshot(draft());
        if let Some(snapshot) = session.cached_snapshot_mut() {
            snapshot.basic_info.year = 2023;
        }
        assert_eq!(session.cached_snapshot().unwrap().basic_info.year, 2023);

        session.invalidate_snapshot();
        assert!(session.cached_snapshot_mut().is_none());
        assert_eq!(session.draft_id(), Some("listing-1"));
    }
}
