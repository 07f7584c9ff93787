//! Submission error taxonomy
//!
//! Every failure mode of one submission attempt. Nothing here escapes the
//! orchestrators uncaught; each variant lands the form in a defined phase
//! with the submit affordance re-enabled.

use crate::asset::AssetError;
use driplock_forms::FieldErrors;
use thiserror::Error;

/// Vague by design: shown for honeypot rejections without revealing that
/// bot detection ran.
pub const GENERIC_REJECTION: &str = "Unable to process your request. Please try again later.";

/// Form-level fallback when an external service failed without a message.
pub const SUPPORT_FALLBACK: &str =
    "Something went wrong submitting the form. Please try again, or reach us at \
     support@driplock.com / (866) 555-0147.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Client validation failed; the per-field map carries the detail.
    #[error("please correct the highlighted fields")]
    Validation(FieldErrors),

    /// Honeypot tripped. Surfaced as [`GENERIC_REJECTION`].
    #[error("Unable to process your request. Please try again later.")]
    Rejected,

    /// Verification-token acquisition failed.
    #[error("{0}")]
    Token(String),

    /// Photo validation, encoding, or upload failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The relay or auth backend reported failure.
    #[error("{0}")]
    Backend(String),

    /// Another attempt is already in flight on this form instance.
    #[error("a submission is already in progress")]
    InFlight,
}

impl SubmissionError {
    /// The message to show in the form-level banner, if this error is not
    /// field-scoped.
    pub fn banner_message(&self) -> Option<String> {
        match self {
            Self::Validation(_) => None,
            other => Some(other.to_string()),
        }
    }
}
