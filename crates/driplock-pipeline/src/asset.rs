//! Photo upload flow
//!
//! Small state machine for the encode-then-upload exchange:
//! `Idle → Encoding → Uploading → Ready(url) | Failed(reason)`.
//! Each partial-failure state is observable, and the relay step is never
//! reachable without a `Ready` URL in hand.

use crate::ports::{AssetUploader, ProviderError};
use base64::Engine as _;
use driplock_forms::{check_photo, FileMeta};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetPhase {
    Idle,
    Encoding,
    Uploading,
    Ready(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Size/type re-check failed. Same source of truth as the selection-time
    /// check, so the two can never disagree.
    #[error("{0}")]
    Invalid(String),

    /// The declared file size did not match the bytes handed over.
    #[error("The selected photo could not be read. Please choose it again.")]
    Mismatch,

    /// The upload service rejected the exchange.
    #[error("Photo upload failed: {0}")]
    Upload(String),
}

#[derive(Debug, Default)]
pub struct AssetFlow {
    phase: AssetPhase,
}

impl Default for AssetPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl AssetFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &AssetPhase {
        &self.phase
    }

    pub fn reset(&mut self) {
        self.phase = AssetPhase::Idle;
    }

    /// Drive the full exchange: re-validate, encode, upload, and return the
    /// permanent URL. Any failure leaves the machine in `Failed` and aborts
    /// the surrounding submission.
    pub async fn resolve(
        &mut self,
        meta: &FileMeta,
        bytes: &[u8],
        uploader: &dyn AssetUploader,
    ) -> Result<String, AssetError> {
        self.phase = AssetPhase::Encoding;

        // Defense in depth: the input-level check can be bypassed
        if let Err(issue) = check_photo(meta) {
            return Err(self.fail(AssetError::Invalid(issue.to_string())));
        }
        if bytes.len() as u64 != meta.size_bytes {
            return Err(self.fail(AssetError::Mismatch));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        debug!(size = bytes.len(), content_type = %meta.content_type, "photo encoded");

        self.phase = AssetPhase::Uploading;
        match uploader.upload(&encoded, &meta.content_type).await {
            Ok(url) => {
                debug!(%url, "photo exchanged for permanent URL");
                self.phase = AssetPhase::Ready(url.clone());
                Ok(url)
            }
            Err(ProviderError::Service(message)) => {
                warn!(%message, "upload service rejected photo");
                Err(self.fail(AssetError::Upload(message)))
            }
            Err(ProviderError::Network(detail)) => {
                warn!(%detail, "photo upload transport failure");
                Err(self.fail(AssetError::Upload(
                    "the upload service is unreachable".to_string(),
                )))
            }
        }
    }

    fn fail(&mut self, error: AssetError) -> AssetError {
        self.phase = AssetPhase::Failed(error.to_string());
        error
    }
}
