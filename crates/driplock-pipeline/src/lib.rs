//! DripLock Submission Pipeline
//!
//! Orchestrates one submission attempt per form instance, from submit
//! pressed to a terminal outcome:
//!
//! 1. Full-form validation (no network I/O on failure)
//! 2. Honeypot screen (silent generic rejection)
//! 3. Verification-token acquisition
//! 4. Photo encode-and-upload exchange (upgrade claim only)
//! 5. Backend submission: form relay for the claim, hosted auth sequence
//!    for registration
//!
//! All steps within an attempt run strictly sequentially; one attempt per
//! form instance may be in flight, and every failure path lands in a defined
//! phase with the submit affordance re-enabled. External collaborators sit
//! behind the ports in [`ports`]; `driplock-connect` supplies the HTTP
//! implementations.

pub mod asset;
pub mod claim;
pub mod error;
pub mod honeypot;
pub mod ports;
pub mod signup;

#[cfg(test)]
pub(crate) mod testkit;

// Re-exports for convenience
pub use asset::{AssetError, AssetFlow, AssetPhase};
pub use claim::{ClaimForm, ClaimPhase};
pub use error::{SubmissionError, GENERIC_REJECTION, SUPPORT_FALLBACK};
pub use ports::{
    AccountHandle, AssetUploader, AuthProvider, CodeOutcome, FormRelay, ProviderError,
    RelayPayload, SignupMetadata, TokenProvider,
};
pub use signup::{SignupForm, SignupPhase, VerificationChallenge};
