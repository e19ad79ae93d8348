//! In-process registry of wizard session pointers, one per operator.
//!
//! The registry is ephemeral: a restart forgets every pointer, after which
//! later steps redirect to basic info and drafts can be resumed by id.

use std::collections::HashMap;

use tokio::sync::RwLock;

use motorlist_core::draft_session::DraftSession;

#[derive(Debug, Default)]
pub struct DraftSessions {
    sessions: RwLock<HashMap<String, DraftSession>>,
}

impl DraftSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operator's session, or an empty one.
    pub async fn load(&self, operator: &str) -> DraftSession {
        self.sessions
            .read()
            .await
            .get(operator)
            .cloned()
            .unwrap_or_default()
    }

    /// Save the operator's session. An empty session removes the entry.
    pub async fn store(&self, operator: &str, session: DraftSession) {
        let mut sessions = self.sessions.write().await;
        if session.is_empty() {
            sessions.remove(operator);
        } else {
            sessions.insert(operator.to_string(), session);
        }
    }

    pub async fn clear(&self, operator: &str) {
        self.sessions.write().await.remove(operator);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_operator_gets_empty_session() {
        let sessions = DraftSessions::new();
        assert!(sessions.load("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn store_load_clear() {
        let sessions = DraftSessions::new();
        sessions.store("op-1", DraftSession::for_draft("d1")).await;
        sessions.store("op-2", DraftSession::for_draft("d2")).await;

        assert_eq!(sessions.load("op-1").await.draft_id(), Some("d1"));
        assert_eq!(sessions.len().await, 2);

        sessions.clear("op-1").await;
        assert!(sessions.load("op-1").await.is_empty());
        assert_eq!(sessions.load("op-2").await.draft_id(), Some("d2"));
    }

    #[tokio::test]
    async fn storing_empty_session_removes_entry() {
        let sessions = DraftSessions::new();
        sessions.store("op-1", DraftSession::for_draft("d1")).await;
        sessions.store("op-1", DraftSession::new()).await;
        assert_eq!(sessions.len().await, 0);
    }
}
