//! Image-vault client
//!
//! Exchanges a base64-encoded image payload for a permanent URL.

use crate::config::ConnectConfig;
use async_trait::async_trait;
use driplock_pipeline::{AssetUploader, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub struct ImageVaultClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    key: &'a str,
    image: &'a str,
    content_type: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    success: bool,
    image_url: Option<String>,
    error: Option<String>,
}

impl ImageVaultClient {
    pub fn new(config: &ConnectConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.image_vault_url.clone(),
            api_key: config.image_vault_key.clone(),
        })
    }
}

#[async_trait]
impl AssetUploader for ImageVaultClient {
    async fn upload(
        &self,
        image_base64: &str,
        content_type: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/upload", self.base_url);
        let body = UploadRequest {
            key: &self.api_key,
            image: image_base64,
            content_type,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(%status, "image vault returned non-success status");
            return Err(ProviderError::Service(format!(
                "upload service error ({status})"
            )));
        }

        let parsed: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        match parsed {
            UploadResponse { success: true, image_url: Some(url), .. } => Ok(url),
            UploadResponse { error, .. } => {
                let message = error.unwrap_or_else(|| "upload rejected".to_string());
                warn!(%message, "image vault rejected upload");
                Err(ProviderError::Service(message))
            }
        }
    }
}
