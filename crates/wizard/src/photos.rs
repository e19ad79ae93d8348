//! Photo uploads for the last wizard step.

use serde::Serialize;

use motorlist_core::field_errors::FieldErrors;
use motorlist_core::hashing::content_addressed_name;
use motorlist_db::MediaStore;

use crate::error::WizardError;

/// Accepted content types and the file extension stored for each.
pub const ALLOWED_PHOTO_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedPhoto {
    pub url: String,
    pub name: String,
    pub content_type: String,
    pub size: usize,
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_PHOTO_TYPES
        .iter()
        .find(|(ct, _)| ct.eq_ignore_ascii_case(content_type))
        .map(|(_, ext)| *ext)
}

/// Validate and store one photo under a content-addressed name.
///
/// Identical bytes always land on the same name, so re-uploading a photo is
/// harmless.
pub async fn upload_photo(
    media: &dyn MediaStore,
    content_type: &str,
    bytes: Vec<u8>,
    max_bytes: usize,
) -> Result<UploadedPhoto, WizardError> {
    let content_type = content_type.trim().to_ascii_lowercase();
    let Some(extension) = extension_for(&content_type) else {
        let allowed: Vec<_> = ALLOWED_PHOTO_TYPES.iter().map(|(ct, _)| *ct).collect();
        return Err(FieldErrors::single(
            "file",
            format!("unsupported content type '{content_type}', expected one of: {}", allowed.join(", ")),
        )
        .into());
    };
    if bytes.is_empty() {
        return Err(FieldErrors::single("file", "file is empty").into());
    }
    if bytes.len() > max_bytes {
        return Err(FieldErrors::single("file", format!("file exceeds {max_bytes} bytes")).into());
    }

    let name = content_addressed_name(&bytes, extension);
    let size = bytes.len();
    let url = media.upload(&name, &content_type, bytes).await?;

    tracing::info!(name = %name, size, content_type = %content_type, "Photo uploaded");

    Ok(UploadedPhoto {
        url,
        name,
        content_type,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use motorlist_db::MemoryMediaStore;

    #[tokio::test]
    async fn stores_under_content_hash() {
        let media = MemoryMediaStore::new();
        let first = upload_photo(&media, "image/JPEG", vec![1, 2, 3], 1024)
            .await
            .unwrap();
        let again = upload_photo(&media, "image/jpeg", vec![1, 2, 3], 1024)
            .await
            .unwrap();

        assert!(first.name.ends_with(".jpg"));
        assert_eq!(first.name.len(), 64 + 4);
        assert_eq!(first, again);
        assert_eq!(media.len().await, 1);
    }

    #[tokio::test]
    async fn rejects_wrong_type_and_size() {
        let media = MemoryMediaStore::new();
        assert_matches!(
            upload_photo(&media, "image/gif", vec![1], 1024).await,
            Err(WizardError::Validation(ref f)) if f.contains("file")
        );
        assert_matches!(
            upload_photo(&media, "image/png", vec![0; 11], 10).await,
            Err(WizardError::Validation(_))
        );
        assert_matches!(
            upload_photo(&media, "image/png", Vec::new(), 10).await,
            Err(WizardError::Validation(_))
        );
        assert_eq!(media.len().await, 0);
    }

    #[tokio::test]
    async fn media_failure_is_reported() {
        let media = MemoryMediaStore::failing();
        assert_matches!(
            upload_photo(&media, "image/png", vec![1], 10).await,
            Err(WizardError::Media(_))
        );
    }
}
