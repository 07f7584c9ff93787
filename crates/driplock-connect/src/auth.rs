//! Hosted identity client
//!
//! JSON endpoints for the five auth operations: account creation, metadata
//! attachment, email-code request/confirmation, and session activation.

use crate::config::ConnectConfig;
use async_trait::async_trait;
use driplock_pipeline::{AccountHandle, AuthProvider, CodeOutcome, ProviderError, SignupMetadata};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
}

#[derive(Serialize)]
struct CreateAccountRequest<'a> {
    client_id: &'a str,
    email: &'a str,
    password: &'a str,
    given_name: &'a str,
    family_name: &'a str,
}

#[derive(Deserialize)]
struct CreateAccountResponse {
    account_id: String,
}

#[derive(Serialize)]
struct ConfirmCodeRequest<'a> {
    client_id: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct ConfirmCodeResponse {
    status: String,
    session_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl IdentityClient {
    pub fn new(config: &ConnectConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.identity_url.clone(),
            client_id: config.identity_client_id.clone(),
        })
    }

    /// Turn a non-success response into the provider's message when it sent
    /// one, else a transport error.
    async fn reject(resp: reqwest::Response, context: &str) -> ProviderError {
        let status = resp.status();
        warn!(%status, context, "identity provider refused request");
        match resp.json::<ErrorBody>().await {
            Ok(ErrorBody { message: Some(message) }) => ProviderError::Service(message),
            _ => ProviderError::Network(format!("{context} failed with status {status}")),
        }
    }
}

#[async_trait]
impl AuthProvider for IdentityClient {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        given_name: &str,
        family_name: &str,
    ) -> Result<AccountHandle, ProviderError> {
        let url = format!("{}/accounts", self.base_url);
        let body = CreateAccountRequest {
            client_id: &self.client_id,
            email,
            password,
            given_name,
            family_name,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp, "account creation").await);
        }

        let parsed: CreateAccountResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(AccountHandle(parsed.account_id))
    }

    async fn attach_metadata(
        &self,
        handle: &AccountHandle,
        metadata: &SignupMetadata,
    ) -> Result<(), ProviderError> {
        let url = format!("{}/accounts/{}/metadata", self.base_url, handle.0);
        let resp = self
            .client
            .put(&url)
            .json(metadata)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp, "metadata attachment").await);
        }
        Ok(())
    }

    async fn request_email_code(&self, handle: &AccountHandle) -> Result<(), ProviderError> {
        let url = format!("{}/accounts/{}/email-code", self.base_url, handle.0);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp, "email code request").await);
        }
        Ok(())
    }

    async fn confirm_email_code(
        &self,
        handle: &AccountHandle,
        code: &str,
    ) -> Result<CodeOutcome, ProviderError> {
        let url = format!("{}/accounts/{}/email-code/confirm", self.base_url, handle.0);
        let body = ConfirmCodeRequest { client_id: &self.client_id, code };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp, "code confirmation").await);
        }

        let parsed: ConfirmCodeResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        match (parsed.status.as_str(), parsed.session_id) {
            ("complete", Some(session_id)) => Ok(CodeOutcome::Complete { session_id }),
            _ => Ok(CodeOutcome::Incomplete),
        }
    }

    async fn activate_session(&self, session_id: &str) -> Result<(), ProviderError> {
        let url = format!("{}/sessions/{}/activate", self.base_url, session_id);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp, "session activation").await);
        }
        Ok(())
    }
}
