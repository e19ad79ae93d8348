use std::sync::Arc;

use motorlist_db::{DocumentStore, MediaStore};

use crate::config::ServerConfig;
use crate::sessions::DraftSessions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Listing documents (Postgres or in-memory).
    pub store: Arc<dyn DocumentStore>,
    /// Photo storage.
    pub media: Arc<dyn MediaStore>,
    /// Per-operator wizard session pointers.
    pub sessions: Arc<DraftSessions>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
