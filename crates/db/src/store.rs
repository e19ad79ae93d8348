//! The document store interface.
//!
//! A deliberately narrow contract: documents are JSON objects grouped into
//! named collections, addressed by an opaque id assigned on creation.
//! Nothing spans more than one call atomically.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use motorlist_core::types::{DocumentId, Timestamp};

/// A stored document.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub collection: String,
    pub data: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// A top-level string field of `data`.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }
}

/// Equality on a top-level field of `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &Value) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// Build the JSONB object used for containment queries.
pub(crate) fn filters_to_object(filters: &[Filter]) -> Value {
    let map = filters
        .iter()
        .map(|f| (f.field.clone(), f.value.clone()))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(map)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document data must be a JSON object")]
    NotAnObject,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `data` into `collection` under a fresh id.
    async fn create(&self, collection: &str, data: Value) -> Result<Document, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Replace the data of an existing document. `None` when it does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Option<Document>, StoreError>;

    /// All documents in `collection` matching every filter, oldest first.
    async fn query(&self, collection: &str, filters: &[Filter])
        -> Result<Vec<Document>, StoreError>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) fn ensure_object(data: &Value) -> Result<(), StoreError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(StoreError::NotAnObject)
    }
}
