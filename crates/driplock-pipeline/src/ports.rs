//! Outbound ports
//!
//! Interfaces to the external collaborators. `driplock-connect` provides the
//! reqwest implementations; tests substitute counting doubles.

use async_trait::async_trait;
use driplock_forms::Role;
use serde::Serialize;
use thiserror::Error;

/// Opaque reference to a provider-side account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountHandle(pub String);

/// Role payload attached to a freshly created account, before email
/// verification completes.
#[derive(Clone, Debug, Serialize)]
pub struct SignupMetadata {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_tax_id: Option<String>,
    /// Cleared provider-side once the email code is confirmed.
    pub pending_verification: bool,
}

/// Outcome of one email-code confirmation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeOutcome {
    Complete { session_id: String },
    Incomplete,
}

/// Failure reported by an external collaborator.
#[derive(Clone, Debug, Error)]
pub enum ProviderError {
    /// The service answered with an explicit message; surface it verbatim.
    #[error("{0}")]
    Service(String),
    /// Transport-level failure; callers substitute a generic message.
    #[error("network error: {0}")]
    Network(String),
}

/// Hosted authentication provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        given_name: &str,
        family_name: &str,
    ) -> Result<AccountHandle, ProviderError>;

    async fn attach_metadata(
        &self,
        handle: &AccountHandle,
        metadata: &SignupMetadata,
    ) -> Result<(), ProviderError>;

    async fn request_email_code(&self, handle: &AccountHandle) -> Result<(), ProviderError>;

    async fn confirm_email_code(
        &self,
        handle: &AccountHandle,
        code: &str,
    ) -> Result<CodeOutcome, ProviderError>;

    async fn activate_session(&self, session_id: &str) -> Result<(), ProviderError>;
}

/// Anti-abuse verification-token provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a short-lived token for the named form action.
    async fn get_token(&self, action: &str) -> Result<String, ProviderError>;
}

/// Image upload service: base64 payload in, permanent URL out.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, image_base64: &str, content_type: &str)
        -> Result<String, ProviderError>;
}

/// URL-encoded payload for the form-relay backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayPayload {
    /// Fixed form-name discriminator.
    pub form_name: String,
    pub fields: Vec<(String, String)>,
    pub token: String,
}

/// Hosted form-relay backend.
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn submit(&self, payload: &RelayPayload) -> Result<(), ProviderError>;
}
