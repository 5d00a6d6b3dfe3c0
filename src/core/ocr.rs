//! OCR.space client
//!
//! The single supported OCR provider. Unlike the chat path there is no
//! fallback chain, so an unknown provider id is a contract violation the
//! gateway raises instead of swallowing.

use crate::core::constants;
use crate::core::provider::ProviderError;
use crate::models::ocr::OcrResponse;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

/// Provider ids accepted for the OCR capability
pub fn is_supported(provider_id: &str) -> bool {
    matches!(
        provider_id.to_lowercase().as_str(),
        "ocrspace" | "ocr.space"
    )
}

pub struct OcrClient {
    endpoint: String,
}

impl OcrClient {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| constants::OCRSPACE_ENDPOINT.to_string()),
        }
    }

    /// Post the image as multipart form data and return the first parsed
    /// text block. The `Err` carries full failure detail; the gateway
    /// decides what survives its boundary.
    pub async fn parse_image(
        &self,
        client: &Client,
        api_key: &str,
        image_path: &Path,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let bytes = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let form = Form::new()
            .text("apikey", api_key.to_string())
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = client
            .post(&self.endpoint)
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        parsed
            .first_text()
            .ok_or_else(|| ProviderError::Decode("no parsed results in OCR response".to_string()))
    }
}
