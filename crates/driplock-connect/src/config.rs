//! Connection configuration
//!
//! Endpoints and keys for the external collaborators, plus the request
//! timeout applied to every client. The source system had no client-side
//! deadline at all; every request here gets one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Verification-token provider.
    pub captcha_url: String,
    pub captcha_site_key: String,

    /// Image upload service.
    pub image_vault_url: String,
    pub image_vault_key: String,

    /// Form-relay backend.
    pub relay_url: String,

    /// Hosted authentication provider.
    pub identity_url: String,
    pub identity_client_id: String,

    /// Per-request deadline, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            captcha_url: "https://captcha.driplock.com".to_string(),
            captcha_site_key: String::new(),
            image_vault_url: "https://img.driplock.com".to_string(),
            image_vault_key: String::new(),
            relay_url: "https://forms.driplock.com".to_string(),
            identity_url: "https://id.driplock.com".to_string(),
            identity_client_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Shared HTTP client with the configured deadline.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.timeout()).build()
    }
}
