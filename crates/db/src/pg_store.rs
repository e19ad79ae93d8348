//! Postgres-backed document store: one `documents` table with a JSONB body.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{ensure_object, filters_to_object, Document, DocumentStore, Filter, StoreError};
use crate::DbPool;

/// Column list for `documents` queries.
const COLUMNS: &str = "id, collection, data, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        ensure_object(&data)?;
        let query = format!(
            "INSERT INTO documents (id, collection, data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(collection)
            .bind(&data)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Option<Document>, StoreError> {
        ensure_object(&data)?;
        let query = format!(
            "UPDATE documents SET data = $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(id)
            .bind(&data)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE collection = $1 AND data @> $2 \
             ORDER BY created_at ASC, id ASC"
        );
        let docs = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(filters_to_object(filters))
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
