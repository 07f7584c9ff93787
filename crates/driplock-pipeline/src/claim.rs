//! Upgrade claim orchestrator
//!
//! Drives one "Core legacy unit to Mini" claim from submit-pressed to a
//! terminal outcome: full validation, honeypot screen, token acquisition,
//! photo exchange, then the relay POST. Phases:
//! `Idle → Validating → Submitting → Submitted`, with every failure
//! returning to `Idle` carrying the error.

use crate::asset::AssetFlow;
use crate::error::{SubmissionError, SUPPORT_FALLBACK};
use crate::honeypot::{self, CLAIM_HONEYPOTS};
use crate::ports::{AssetUploader, FormRelay, ProviderError, RelayPayload, TokenProvider};
use chrono::{DateTime, Utc};
use driplock_forms::{claim, ClaimSchema, FieldValue, FileMeta, FormState, PhotoIssue};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Form-name discriminator sent to the relay backend.
pub const FORM_NAME: &str = "core-mini-upgrade";

/// Token action name for this form.
pub const TOKEN_ACTION: &str = "core_upgrade";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimPhase {
    Idle,
    Validating,
    Submitting,
    /// Terminal until an explicit `reset()`.
    Submitted,
}

pub struct ClaimForm {
    id: Uuid,
    state: FormState<ClaimSchema>,
    photo_bytes: Option<Vec<u8>>,
    asset: AssetFlow,
    phase: ClaimPhase,
    in_flight: bool,
    banner: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
    tokens: Arc<dyn TokenProvider>,
    uploader: Arc<dyn AssetUploader>,
    relay: Arc<dyn FormRelay>,
}

impl ClaimForm {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        uploader: Arc<dyn AssetUploader>,
        relay: Arc<dyn FormRelay>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: FormState::new(ClaimSchema),
            photo_bytes: None,
            asset: AssetFlow::new(),
            phase: ClaimPhase::Idle,
            in_flight: false,
            banner: None,
            submitted_at: None,
            tokens,
            uploader,
            relay,
        }
    }

    pub fn phase(&self) -> &ClaimPhase {
        &self.phase
    }

    pub fn state(&self) -> &FormState<ClaimSchema> {
        &self.state
    }

    /// Form-level error banner, if the last attempt failed outside a field.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Whether the submit control should be disabled.
    pub fn submit_disabled(&self) -> bool {
        self.in_flight || self.phase == ClaimPhase::Submitted
    }

    /// Set a field value. Edits are ignored once the claim is submitted.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        if self.phase == ClaimPhase::Submitted {
            return;
        }
        self.state.set(name, value);
    }

    pub fn touch(&mut self, name: &str) {
        self.state.touch(name);
    }

    /// Selection-time photo check. A size violation clears the pending
    /// selection; a type violation keeps it so the user sees what they
    /// picked alongside the error.
    pub fn attach_photo(&mut self, meta: FileMeta, bytes: Vec<u8>) {
        if self.phase == ClaimPhase::Submitted {
            return;
        }
        match driplock_forms::check_photo(&meta) {
            Err(issue @ PhotoIssue::TooLarge) => {
                self.state.set_attachment(None);
                self.photo_bytes = None;
                self.state.set_error("photo", issue.to_string());
            }
            Err(issue) => {
                self.photo_bytes = Some(bytes);
                self.state.set_attachment(Some(meta));
                self.state.set_error("photo", issue.to_string());
            }
            Ok(()) => {
                self.photo_bytes = Some(bytes);
                self.state.set_attachment(Some(meta));
            }
        }
    }

    pub fn remove_photo(&mut self) {
        self.photo_bytes = None;
        self.state.set_attachment(None);
    }

    /// One complete submission attempt. The submit affordance stays
    /// disabled for the duration and re-enables unconditionally once the
    /// attempt settles.
    pub async fn submit(&mut self) -> Result<(), SubmissionError> {
        if self.phase == ClaimPhase::Submitted {
            return Ok(());
        }
        if self.in_flight {
            return Err(SubmissionError::InFlight);
        }

        self.in_flight = true;
        self.banner = None;
        let result = self.run_attempt().await;
        self.in_flight = false;

        match &result {
            Ok(()) => {
                self.phase = ClaimPhase::Submitted;
                self.submitted_at = Some(Utc::now());
                // Permanent URL obtained; the local bytes are no longer needed
                self.photo_bytes = None;
                info!(claim = %self.id, "upgrade claim submitted");
            }
            Err(error) => {
                self.phase = ClaimPhase::Idle;
                match error {
                    // Field map already carries the detail
                    SubmissionError::Validation(_) => {}
                    // Asset failures scope to the upload control
                    SubmissionError::Asset(asset) => {
                        self.state.set_error("photo", asset.to_string());
                    }
                    other => self.banner = other.banner_message(),
                }
            }
        }
        result
    }

    /// Return to `Idle` with all transient state cleared.
    pub fn reset(&mut self) {
        self.state.reset();
        self.photo_bytes = None;
        self.asset.reset();
        self.phase = ClaimPhase::Idle;
        self.in_flight = false;
        self.banner = None;
        self.submitted_at = None;
    }

    async fn run_attempt(&mut self) -> Result<(), SubmissionError> {
        self.phase = ClaimPhase::Validating;
        if !self.state.validate_all() {
            return Err(SubmissionError::Validation(self.state.errors().clone()));
        }

        if honeypot::tripped(self.state.values(), CLAIM_HONEYPOTS) {
            warn!(claim = %self.id, "claim rejected by bot screen");
            return Err(SubmissionError::Rejected);
        }

        self.phase = ClaimPhase::Submitting;
        let token = self
            .tokens
            .get_token(TOKEN_ACTION)
            .await
            .map_err(|e| SubmissionError::Token(surfaced_message(e)))?;

        // validate_all guarantees an attachment; fail closed if the bytes
        // went missing between selection and submit
        let meta = match self.state.attachment().cloned() {
            Some(meta) => meta,
            None => return Err(SubmissionError::Asset(crate::asset::AssetError::Mismatch)),
        };
        let bytes = match self.photo_bytes.clone() {
            Some(bytes) => bytes,
            None => return Err(SubmissionError::Asset(crate::asset::AssetError::Mismatch)),
        };
        let photo_url = self
            .asset
            .resolve(&meta, &bytes, self.uploader.as_ref())
            .await?;

        let payload = self.build_payload(photo_url, token);
        self.relay
            .submit(&payload)
            .await
            .map_err(|e| SubmissionError::Backend(surfaced_message(e)))?;

        Ok(())
    }

    fn build_payload(&self, photo_url: String, token: String) -> RelayPayload {
        let values = self.state.values();
        let mut fields: Vec<(String, String)> = claim::FIELDS
            .iter()
            .filter(|f| **f != "photo")
            .map(|f| {
                let value = match values.get(f) {
                    Some(FieldValue::Flag(true)) => "yes".to_string(),
                    Some(FieldValue::Flag(false)) => String::new(),
                    Some(FieldValue::Text(s)) => s.clone(),
                    None => String::new(),
                };
                (f.to_string(), value)
            })
            .collect();
        fields.push(("photo_url".to_string(), photo_url));
        // Honeypots travel empty so the relay side can screen them too
        for hp in CLAIM_HONEYPOTS {
            fields.push((hp.to_string(), self.state.values().text(hp).to_string()));
        }

        RelayPayload {
            form_name: FORM_NAME.to_string(),
            fields,
            token,
        }
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
    use crate::testkit::{MockRelay, MockTokens, MockUploader};

    fn valid_claim(
        tokens: Arc<MockTokens>,
        uploader: Arc<MockUploader>,
        relay: Arc<MockRelay>,
    ) -> ClaimForm {
        let mut form = ClaimForm::new(tokens, uploader, relay);
        form.set("first_name", "Pat");
        form.set("last_name", "Rivera");
        form.set("email", "pat@example.com");
        form.set("phone", "(305) 555-0147");
        form.set("street", "214 Seabreeze Ave");
        form.set("city", "Miami");
        form.set("state", "FL");
        form.set("zip", "33101");
        form.set("consent", true);
        form.attach_photo(
            FileMeta {
                file_name: "unit.jpg".into(),
                content_type: "image/jpeg".into(),
                size_bytes: 2 * 1024 * 1024,
            },
            vec![0u8; 2 * 1024 * 1024],
        );
        form
    }

    #[tokio::test]
    async fn test_happy_path_uploads_once_then_relays_once() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        form.submit().await.unwrap();

        assert_eq!(uploader.calls(), 1);
        assert_eq!(relay.calls(), 1);
        assert_eq!(form.phase(), &ClaimPhase::Submitted);
        assert!(form.submitted_at().is_some());

        let payload = relay.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.form_name, FORM_NAME);
        assert_eq!(payload.token, "tok-1");
        assert!(payload
            .fields
            .iter()
            .any(|(k, v)| k == "photo_url" && v == "https://img.example.com/unit.jpg"));
        assert!(payload.fields.iter().any(|(k, v)| k == "consent" && v == "yes"));
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_network_calls() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = ClaimForm::new(tokens.clone(), uploader.clone(), relay.clone());
        form.set("email", "not-an-email");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert_eq!(tokens.calls(), 0);
        assert_eq!(uploader.calls(), 0);
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.phase(), &ClaimPhase::Idle);
        // Full pass marked every field touched and surfaced its error
        assert!(form.state().error("zip").is_some());
        assert!(form.state().error("photo").is_some());
    }

    #[tokio::test]
    async fn test_filled_honeypot_aborts_silently() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());
        form.set("fax_number", "555-0100");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected));
        // Generic message, nothing about honeypots
        let banner = form.banner().unwrap();
        assert!(!banner.to_lowercase().contains("honeypot"));
        assert!(!banner.to_lowercase().contains("bot"));
        assert_eq!(tokens.calls(), 0);
        assert_eq!(uploader.calls(), 0);
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn test_token_failure_stops_before_upload() {
        let tokens = Arc::new(MockTokens::failing("verification unavailable"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Token(_)));
        assert_eq!(form.banner(), Some("verification unavailable"));
        assert_eq!(uploader.calls(), 0);
        assert_eq!(relay.calls(), 0);
        assert!(!form.submit_disabled());
    }

    #[tokio::test]
    async fn test_upload_failure_never_reaches_relay() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::failing("storage full"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Asset(_)));
        assert_eq!(relay.calls(), 0);
        // Asset errors scope to the upload control, not the banner
        assert!(form.state().error("photo").is_some());
        assert_eq!(form.phase(), &ClaimPhase::Idle);
    }

    #[tokio::test]
    async fn test_relay_failure_surfaces_message_and_allows_retry() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::failing("relay rejected the submission"));
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Backend(_)));
        assert_eq!(form.banner(), Some("relay rejected the submission"));
        assert_eq!(form.phase(), &ClaimPhase::Idle);
        assert!(!form.submit_disabled());
    }

    #[tokio::test]
    async fn test_submitted_is_terminal_until_reset() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        form.submit().await.unwrap();
        assert_eq!(relay.calls(), 1);

        // Edits and re-submits are ignored once terminal
        form.set("email", "other@example.com");
        assert_eq!(form.state().values().text("email"), "pat@example.com");
        form.submit().await.unwrap();
        assert_eq!(relay.calls(), 1);

        form.reset();
        assert_eq!(form.phase(), &ClaimPhase::Idle);
        assert_eq!(form.state().values().text("first_name"), "");
        assert!(form.banner().is_none());
    }

    #[tokio::test]
    async fn test_token_action_name() {
        let tokens = Arc::new(MockTokens::ok("tok-1"));
        let uploader = Arc::new(MockUploader::ok("https://img.example.com/unit.jpg"));
        let relay = Arc::new(MockRelay::ok());
        let mut form = valid_claim(tokens.clone(), uploader.clone(), relay.clone());

        form.submit().await.unwrap();
        assert_eq!(
            tokens.last_action.lock().unwrap().as_deref(),
            Some(TOKEN_ACTION)
        );
    }
}
