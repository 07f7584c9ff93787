//! Verification-token client

use crate::config::ConnectConfig;
use async_trait::async_trait;
use driplock_pipeline::{ProviderError, TokenProvider};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub struct CaptchaClient {
    client: reqwest::Client,
    base_url: String,
    site_key: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    site_key: &'a str,
    action: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    success: bool,
    token: Option<String>,
    error: Option<String>,
}

impl CaptchaClient {
    pub fn new(config: &ConnectConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.captcha_url.clone(),
            site_key: config.captcha_site_key.clone(),
        })
    }
}

#[async_trait]
impl TokenProvider for CaptchaClient {
    async fn get_token(&self, action: &str) -> Result<String, ProviderError> {
        let url = format!("{}/token", self.base_url);
        let body = TokenRequest { site_key: &self.site_key, action };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let parsed: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        match parsed {
            TokenResponse { success: true, token: Some(token), .. } => Ok(token),
            TokenResponse { error, .. } => {
                let message = error.unwrap_or_else(|| "verification unavailable".to_string());
                warn!(action, %message, "token acquisition refused");
                Err(ProviderError::Service(message))
            }
        }
    }
}
