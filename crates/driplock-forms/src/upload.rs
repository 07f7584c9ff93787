//! Photo attachment checks
//!
//! The single source of truth for file validation. The claim form runs this
//! check at selection time and the orchestrator runs it again before upload;
//! both call the same routine so the two can never disagree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted photo size: 5 MB.
pub const MAX_PHOTO_BYTES: u64 = 5_242_880;

/// Accepted image MIME types.
pub const ALLOWED_PHOTO_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Metadata of a client-selected file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A rejected photo, with the user-facing message for the upload control.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PhotoIssue {
    #[error("Photo must be 5MB or smaller")]
    TooLarge,
    #[error("Photo must be a JPEG, PNG, GIF, or WebP image")]
    UnsupportedType,
}

impl PhotoIssue {
    /// A size violation also clears the browser's pending file selection.
    pub fn clears_selection(&self) -> bool {
        matches!(self, Self::TooLarge)
    }
}

/// Validate a selected photo against the size cap and MIME allow-list.
pub fn check_photo(meta: &FileMeta) -> Result<(), PhotoIssue> {
    if meta.size_bytes > MAX_PHOTO_BYTES {
        return Err(PhotoIssue::TooLarge);
    }
    let content_type = meta.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_PHOTO_TYPES.contains(&content_type.as_str()) {
        return Err(PhotoIssue::UnsupportedType);
    }
    Ok(())
}
