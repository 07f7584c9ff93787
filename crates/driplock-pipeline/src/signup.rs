//! Registration orchestrator
//!
//! Drives account creation against the hosted auth provider, then the
//! email-code verification sub-step. Phases:
//! `Idle → Validating → Submitting → PendingVerification → VerifyingCode →
//! Authenticated`. Failure while submitting returns to `Idle`; a failed
//! code attempt returns to `PendingVerification` with a code-field error
//! and no client-side retry cap.

use crate::error::{SubmissionError, SUPPORT_FALLBACK};
use crate::honeypot::{self, SIGNUP_HONEYPOTS};
use crate::ports::{
    AccountHandle, AuthProvider, CodeOutcome, ProviderError, SignupMetadata, TokenProvider,
};
use chrono::{DateTime, Utc};
use driplock_forms::{FieldValue, FormState, Role, SignupSchema};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Token action name for the registration form.
pub const TOKEN_ACTION: &str = "signup";

/// Error key for the verification-code input.
pub const CODE_FIELD: &str = "verification_code";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupPhase {
    Idle,
    Validating,
    Submitting,
    PendingVerification,
    VerifyingCode,
    Authenticated,
}

/// The pending email-code confirmation: created when signup succeeds
/// server-side, consumed by a successful verification attempt.
#[derive(Clone, Debug)]
pub struct VerificationChallenge {
    pub handle: AccountHandle,
    pub requested_at: DateTime<Utc>,
    pub attempts: u32,
}

pub struct SignupForm {
    id: Uuid,
    state: FormState<SignupSchema>,
    phase: SignupPhase,
    in_flight: bool,
    banner: Option<String>,
    challenge: Option<VerificationChallenge>,
    /// Caller-supplied destination for the post-auth redirect.
    destination: String,
    auth: Arc<dyn AuthProvider>,
    tokens: Arc<dyn TokenProvider>,
}

impl SignupForm {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        tokens: Arc<dyn TokenProvider>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: FormState::new(SignupSchema),
            phase: SignupPhase::Idle,
            in_flight: false,
            banner: None,
            challenge: None,
            destination: destination.into(),
            auth,
            tokens,
        }
    }

    pub fn phase(&self) -> &SignupPhase {
        &self.phase
    }

    pub fn state(&self) -> &FormState<SignupSchema> {
        &self.state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn challenge(&self) -> Option<&VerificationChallenge> {
        self.challenge.as_ref()
    }

    pub fn submit_disabled(&self) -> bool {
        self.in_flight
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.state.set(name, value);
    }

    pub fn touch(&mut self, name: &str) {
        self.state.touch(name);
    }

    /// One complete signup attempt, ending in `PendingVerification` on
    /// success. The code-entry step stays on screen; no navigation happens
    /// here.
    pub async fn submit(&mut self) -> Result<(), SubmissionError> {
        if self.in_flight {
            return Err(SubmissionError::InFlight);
        }
        if self.phase == SignupPhase::PendingVerification
            || self.phase == SignupPhase::Authenticated
        {
            return Ok(());
        }

        self.in_flight = true;
        self.banner = None;
        let result = self.run_attempt().await;
        self.in_flight = false;

        match &result {
            Ok(()) => {
                self.phase = SignupPhase::PendingVerification;
                info!(signup = %self.id, "account created, awaiting email code");
            }
            Err(error) => {
                self.phase = SignupPhase::Idle;
                if !matches!(error, SubmissionError::Validation(_)) {
                    self.banner = error.banner_message();
                }
            }
        }
        result
    }

    /// One email-code attempt. On success the session is activated and the
    /// caller receives the redirect destination; on failure the form stays
    /// on the code-entry step with a field-scoped error. Retries are
    /// unlimited client-side.
    pub async fn verify_code(&mut self, code: &str) -> Result<Option<String>, SubmissionError> {
        if self.in_flight {
            return Err(SubmissionError::InFlight);
        }
        let challenge = match self.challenge.as_mut() {
            Some(c) if self.phase == SignupPhase::PendingVerification => c,
            _ => return Err(SubmissionError::Backend(SUPPORT_FALLBACK.to_string())),
        };
        challenge.attempts += 1;
        let attempt = challenge.attempts;
        let handle = challenge.handle.clone();

        // Clear the previous attempt's error before trying again
        self.state.clear_error(CODE_FIELD);
        self.in_flight = true;
        self.phase = SignupPhase::VerifyingCode;
        info!(signup = %self.id, attempt, "verifying email code");

        let outcome = self.auth.confirm_email_code(&handle, code.trim()).await;
        self.in_flight = false;

        match outcome {
            Ok(CodeOutcome::Complete { session_id }) => {
                match self.auth.activate_session(&session_id).await {
                    Ok(()) => {
                        self.phase = SignupPhase::Authenticated;
                        self.challenge = None;
                        info!(signup = %self.id, "session established");
                        Ok(Some(self.destination.clone()))
                    }
                    Err(e) => {
                        self.phase = SignupPhase::PendingVerification;
                        let message = surfaced_message(e);
                        self.state.set_error(CODE_FIELD, message.clone());
                        Err(SubmissionError::Backend(message))
                    }
                }
            }
            Ok(CodeOutcome::Incomplete) => {
                self.phase = SignupPhase::PendingVerification;
                self.state
                    .set_error(CODE_FIELD, "That code didn't work. Please try again.");
                Ok(None)
            }
            Err(e) => {
                warn!(signup = %self.id, attempt, "code confirmation failed");
                self.phase = SignupPhase::PendingVerification;
                let message = surfaced_message(e);
                self.state.set_error(CODE_FIELD, message.clone());
                Err(SubmissionError::Backend(message))
            }
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.phase = SignupPhase::Idle;
        self.in_flight = false;
        self.banner = None;
        self.challenge = None;
    }

    async fn run_attempt(&mut self) -> Result<(), SubmissionError> {
        self.phase = SignupPhase::Validating;
        if !self.state.validate_all() {
            return Err(SubmissionError::Validation(self.state.errors().clone()));
        }

        if honeypot::tripped(self.state.values(), SIGNUP_HONEYPOTS) {
            warn!(signup = %self.id, "signup rejected by bot screen");
            return Err(SubmissionError::Rejected);
        }

        self.phase = SignupPhase::Submitting;
        let _token = self
            .tokens
            .get_token(TOKEN_ACTION)
            .await
            .map_err(|e| SubmissionError::Token(surfaced_message(e)))?;

        let values = self.state.values();
        let (given_name, family_name) = split_name(values.text("name"));
        let email = values.text("email").trim().to_string();
        let password = values.text("password").to_string();

        let handle = self
            .auth
            .create_account(&email, &password, &given_name, &family_name)
            .await
            .map_err(|e| SubmissionError::Backend(surfaced_message(e)))?;

        let metadata = self.build_metadata();
        self.auth
            .attach_metadata(&handle, &metadata)
            .await
            .map_err(|e| SubmissionError::Backend(surfaced_message(e)))?;

        self.auth
            .request_email_code(&handle)
            .await
            .map_err(|e| SubmissionError::Backend(surfaced_message(e)))?;

        self.challenge = Some(VerificationChallenge {
            handle,
            requested_at: Utc::now(),
            attempts: 0,
        });
        Ok(())
    }

    /// Role payload for the provider. `validate_all` has already run, so the
    /// role parses; `Homeowner` is a safe fallback if it somehow does not.
    fn build_metadata(&self) -> SignupMetadata {
        let values = self.state.values();
        let role = Role::parse(values.text("role")).unwrap_or(Role::Homeowner);
        let text = |name: &str| {
            let v = values.text(name).trim().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        };
        SignupMetadata {
            role,
            company: text("company"),
            state: text("state"),
            license_number: text("license_number"),
            business_tax_id: text("business_tax_id"),
            pending_verification: true,
        }
    }
}

/// First whitespace-separated word becomes the given name, the remainder the
/// family name.
fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((given, family)) => (given.to_string(), family.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

fn surfaced_message(error: ProviderError) -> String {
    match error {
        ProviderError::Service(message) if !message.trim().is_empty() => message,
        _ => SUPPORT_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{CodeBehavior, MockAuth, MockTokens};

    fn valid_signup(auth: Arc<MockAuth>, tokens: Arc<MockTokens>) -> SignupForm {
        let mut form = SignupForm::new(auth, tokens, "/dashboard");
        form.set("name", "Pat Rivera");
        form.set("email", "pat@example.com");
        form.set("password", "Secret123!");
        form.set("confirm_password", "Secret123!");
        form.set("role", "hvac_pro");
        form.set("company", "Rivera Cooling");
        form.set("state", "FL");
        form.set("license_number", "CAC1234567");
        form.set("accept_terms", true);
        form
    }

    #[tokio::test]
    async fn test_signup_reaches_pending_verification() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Complete));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = valid_signup(auth.clone(), tokens.clone());

        form.submit().await.unwrap();

        assert_eq!(form.phase(), &SignupPhase::PendingVerification);
        assert_eq!(auth.create_calls(), 1);
        assert_eq!(auth.code_request_calls(), 1);
        assert_eq!(tokens.last_action.lock().unwrap().as_deref(), Some(TOKEN_ACTION));

        let metadata = auth.last_metadata.lock().unwrap().clone().unwrap();
        assert_eq!(metadata.role, Role::HvacPro);
        assert_eq!(metadata.state.as_deref(), Some("FL"));
        assert_eq!(metadata.license_number.as_deref(), Some("CAC1234567"));
        assert!(metadata.pending_verification);
    }

    #[tokio::test]
    async fn test_invalid_license_blocks_account_creation() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Complete));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = valid_signup(auth.clone(), tokens.clone());
        // Valid state, wrong license shape for Florida
        form.set("license_number", "12345");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(form.state().error("license_number").is_some());
        assert_eq!(auth.create_calls(), 0);
        assert_eq!(tokens.calls(), 0);
        assert_eq!(form.phase(), &SignupPhase::Idle);
    }

    #[tokio::test]
    async fn test_filled_honeypot_rejects_before_auth() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Complete));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = valid_signup(auth.clone(), tokens.clone());
        form.set("nickname", "totally human");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected));
        assert_eq!(auth.create_calls(), 0);
        assert_eq!(tokens.calls(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_code_keeps_pending_and_allows_retry() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Incomplete));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = valid_signup(auth.clone(), tokens.clone());
        form.submit().await.unwrap();

        let outcome = form.verify_code("000000").await.unwrap();
        assert_eq!(outcome, None);
        assert_eq!(form.phase(), &SignupPhase::PendingVerification);
        assert!(form.state().error(CODE_FIELD).is_some());
        assert_eq!(form.challenge().unwrap().attempts, 1);

        // A later attempt with a good code succeeds
        auth.set_code_behavior(CodeBehavior::Complete);
        let outcome = form.verify_code("123456").await.unwrap();
        assert_eq!(outcome.as_deref(), Some("/dashboard"));
        assert_eq!(form.phase(), &SignupPhase::Authenticated);
        assert_eq!(auth.confirm_calls(), 2);
        assert_eq!(auth.activate_calls(), 1);
        assert_eq!(form.state().error(CODE_FIELD), None);
    }

    #[tokio::test]
    async fn test_failed_code_surfaces_provider_message() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Fails));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = valid_signup(auth.clone(), tokens.clone());
        form.submit().await.unwrap();

        let err = form.verify_code("999999").await.unwrap_err();
        assert!(matches!(err, SubmissionError::Backend(_)));
        assert_eq!(form.state().error(CODE_FIELD), Some("Invalid code"));
        assert_eq!(form.phase(), &SignupPhase::PendingVerification);
        assert_eq!(auth.activate_calls(), 0);
    }

    #[tokio::test]
    async fn test_verify_without_pending_challenge_fails_closed() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Complete));
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let mut form = SignupForm::new(auth.clone(), tokens, "/dashboard");

        assert!(form.verify_code("123456").await.is_err());
        assert_eq!(auth.confirm_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_failure_blocks_account_creation() {
        let auth = Arc::new(MockAuth::new(CodeBehavior::Complete));
        let tokens = Arc::new(MockTokens::failing("captcha unavailable"));
        let mut form = valid_signup(auth.clone(), tokens.clone());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Token(_)));
        assert_eq!(form.banner(), Some("captcha unavailable"));
        assert_eq!(auth.create_calls(), 0);
        assert_eq!(form.phase(), &SignupPhase::Idle);
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Pat Rivera"), ("Pat".into(), "Rivera".into()));
        assert_eq!(split_name("Pat"), ("Pat".into(), "".into()));
        assert_eq!(
            split_name("  Mary Anne  Smith "),
            ("Mary".into(), "Anne  Smith".into())
        );
    }
}
