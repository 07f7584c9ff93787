//! Form-relay client
//!
//! URL-encoded POST to the hosted form backend, carrying the form-name
//! discriminator, the verification token, and the honeypot fields.

use crate::config::ConnectConfig;
use async_trait::async_trait;
use driplock_pipeline::{FormRelay, ProviderError, RelayPayload};
use serde::Deserialize;
use tracing::{debug, warn};

pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

fn default_success() -> bool {
    true
}

#[derive(Deserialize)]
struct RelayResponse {
    /// Absent flag reads as success; only an explicit `false` fails.
    #[serde(default = "default_success")]
    success: bool,
    message: Option<String>,
}

impl RelayClient {
    pub fn new(config: &ConnectConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.relay_url.clone(),
        })
    }
}

#[async_trait]
impl FormRelay for RelayClient {
    async fn submit(&self, payload: &RelayPayload) -> Result<(), ProviderError> {
        let url = format!("{}/submit", self.base_url);
        let mut form: Vec<(&str, &str)> = vec![
            ("form-name", payload.form_name.as_str()),
            ("captcha-token", payload.token.as_str()),
        ];
        for (name, value) in &payload.fields {
            form.push((name.as_str(), value.as_str()));
        }

        debug!(form_name = %payload.form_name, fields = payload.fields.len(), "relaying submission");
        let resp = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(%status, form_name = %payload.form_name, "relay returned non-success status");
            return Err(ProviderError::Service(format!(
                "the form service returned an error ({status})"
            )));
        }

        // An empty body counts as success; an explicit failure flag does not
        match resp.json::<RelayResponse>().await {
            Ok(RelayResponse { success: false, message }) => {
                let message = message.unwrap_or_else(|| "submission was not accepted".to_string());
                warn!(%message, "relay reported failure");
                Err(ProviderError::Service(message))
            }
            _ => Ok(()),
        }
    }
}
