//! Media (photo) storage.
//!
//! The wizard only needs one operation: put bytes somewhere and get back a
//! URL that can go into the photos step.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid media name: {0}")]
    InvalidName(String),

    #[error("Media store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `bytes` under `name` and return the public URL.
    async fn upload(&self, name: &str, content_type: &str, bytes: Vec<u8>)
        -> Result<String, MediaError>;
}

/// Names are flat file names; anything that could escape the base directory is refused.
fn check_name(name: &str) -> Result<(), MediaError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..");
    if bad {
        return Err(MediaError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Writes files under a base directory served at `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    base_dir: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(base_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        check_name(name)?;
        tokio::fs::create_dir_all(&self.base_dir).await?;
        let path = self.base_dir.join(name);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!(path = %path.display(), content_type, size = bytes.len(), "Stored media file");
        Ok(format!("{}/{name}", self.public_base_url))
    }
}

/// Keeps uploads in memory. `failing()` builds one whose uploads always error.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    files: RwLock<HashMap<String, (String, Vec<u8>)>>,
    fail: bool,
}

pub const MEMORY_MEDIA_BASE_URL: &str = "https://media.invalid";

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Content type and bytes of a stored file.
    pub async fn get(&self, name: &str) -> Option<(String, Vec<u8>)> {
        self.files.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        if self.fail {
            return Err(MediaError::Unavailable("uploads are disabled".to_string()));
        }
        check_name(name)?;
        self.files
            .write()
            .await
            .insert(name.to_string(), (content_type.to_string(), bytes));
        Ok(format!("{MEMORY_MEDIA_BASE_URL}/{name}"))
    }
}
