//! Persistence for the listing wizard: the document store, the media store
//! and the listing repository that maps wizard sub-records onto collections.

pub mod media;
pub mod memory_store;
pub mod pg_store;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use media::{LocalMediaStore, MediaError, MediaStore, MemoryMediaStore};
pub use memory_store::MemoryDocumentStore;
pub use pg_store::PgDocumentStore;
pub use store::{Document, DocumentStore, Filter, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
