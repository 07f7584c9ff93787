//! Counting test doubles for the outbound ports.

use crate::ports::{
    AccountHandle, AssetUploader, AuthProvider, CodeOutcome, FormRelay, ProviderError,
    RelayPayload, SignupMetadata, TokenProvider,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn bump(counter: &AtomicUsize) -> usize {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// =============================================================================
// TokenProvider double
// =============================================================================

pub struct MockTokens {
    outcome: Result<String, String>,
    calls: AtomicUsize,
    pub last_action: Mutex<Option<String>>,
}

impl MockTokens {
    pub fn ok(token: &str) -> Self {
        Self {
            outcome: Ok(token.to_string()),
            calls: AtomicUsize::new(0),
            last_action: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_action: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for MockTokens {
    async fn get_token(&self, action: &str) -> Result<String, ProviderError> {
        bump(&self.calls);
        *self.last_action.lock().unwrap() = Some(action.to_string());
        self.outcome.clone().map_err(ProviderError::Service)
    }
}

// =============================================================================
// AssetUploader double
// =============================================================================

pub struct MockUploader {
    outcome: Result<String, String>,
    calls: AtomicUsize,
}

impl MockUploader {
    pub fn ok(url: &str) -> Self {
        Self { outcome: Ok(url.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn failing(message: &str) -> Self {
        Self { outcome: Err(message.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetUploader for MockUploader {
    async fn upload(
        &self,
        _image_base64: &str,
        _content_type: &str,
    ) -> Result<String, ProviderError> {
        bump(&self.calls);
        self.outcome.clone().map_err(ProviderError::Service)
    }
}

// =============================================================================
// FormRelay double
// =============================================================================

#[derive(Default)]
pub struct MockRelay {
    fail_with: Option<String>,
    calls: AtomicUsize,
    pub last_payload: Mutex<Option<RelayPayload>>,
}

impl MockRelay {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormRelay for MockRelay {
    async fn submit(&self, payload: &RelayPayload) -> Result<(), ProviderError> {
        bump(&self.calls);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        match &self.fail_with {
            Some(message) => Err(ProviderError::Service(message.clone())),
            None => Ok(()),
        }
    }
}

// =============================================================================
// AuthProvider double
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeBehavior {
    Complete,
    Incomplete,
    Fails,
}

pub struct MockAuth {
    pub code_behavior: Mutex<CodeBehavior>,
    create_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
    code_request_calls: AtomicUsize,
    confirm_calls: AtomicUsize,
    activate_calls: AtomicUsize,
    pub last_metadata: Mutex<Option<SignupMetadata>>,
}

impl MockAuth {
    pub fn new(code_behavior: CodeBehavior) -> Self {
        Self {
            code_behavior: Mutex::new(code_behavior),
            create_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
            code_request_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
            activate_calls: AtomicUsize::new(0),
            last_metadata: Mutex::new(None),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    pub fn activate_calls(&self) -> usize {
        self.activate_calls.load(Ordering::SeqCst)
    }

    pub fn code_request_calls(&self) -> usize {
        self.code_request_calls.load(Ordering::SeqCst)
    }

    pub fn set_code_behavior(&self, behavior: CodeBehavior) {
        *self.code_behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn create_account(
        &self,
        _email: &str,
        _password: &str,
        _given_name: &str,
        _family_name: &str,
    ) -> Result<AccountHandle, ProviderError> {
        bump(&self.create_calls);
        Ok(AccountHandle("acct-test".to_string()))
    }

    async fn attach_metadata(
        &self,
        _handle: &AccountHandle,
        metadata: &SignupMetadata,
    ) -> Result<(), ProviderError> {
        bump(&self.metadata_calls);
        *self.last_metadata.lock().unwrap() = Some(metadata.clone());
        Ok(())
    }

    async fn request_email_code(&self, _handle: &AccountHandle) -> Result<(), ProviderError> {
        bump(&self.code_request_calls);
        Ok(())
    }

    async fn confirm_email_code(
        &self,
        _handle: &AccountHandle,
        _code: &str,
    ) -> Result<CodeOutcome, ProviderError> {
        bump(&self.confirm_calls);
        match *self.code_behavior.lock().unwrap() {
            CodeBehavior::Complete => Ok(CodeOutcome::Complete {
                session_id: "sess-test".to_string(),
            }),
            CodeBehavior::Incomplete => Ok(CodeOutcome::Incomplete),
            CodeBehavior::Fails => Err(ProviderError::Service("Invalid code".to_string())),
        }
    }

    async fn activate_session(&self, _session_id: &str) -> Result<(), ProviderError> {
        bump(&self.activate_calls);
        Ok(())
    }
}
