//! Content addressing for uploaded media.
//!
//! Photos are stored under the SHA-256 of their bytes so that re-uploading
//! the same image from a retried wizard step resolves to the same object.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Build the object name for an upload: `<sha256>.<extension>`.
pub fn content_addressed_name(data: &[u8], extension: &str) -> String {
    format!("{}.{}", sha256_hex(data), extension.trim_start_matches('.'))
}
