//! Answer provider gateway
//!
//! Front door the consuming UI talks to. Internally every upstream call
//! produces a `Result` carrying full failure detail for logging; at this
//! boundary chat failures collapse to an empty string, which the consumer
//! renders as "no answer available". The one exception is an unsupported
//! OCR provider id: that is a caller bug with no fallback chain behind it,
//! so it surfaces as a hard error.

use crate::core::config::ConfigStore;
use crate::core::constants;
use crate::core::ocr::{self, OcrClient};
use crate::core::provider::{ChatProvider, ChatProviderId, ChatRegistry, ProviderError};
use crate::core::providers::{CerebrasProvider, GeminiProvider, OpenRouterProvider};
use crate::geo;
use crate::models::location::NormalizedLocation;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Bounded list of the most recent question texts, oldest evicted first
#[derive(Debug, Default)]
pub struct RecentQuestions {
    entries: VecDeque<String>,
}

impl RecentQuestions {
    pub fn push(&mut self, question: &str) {
        if self.entries.len() == constants::RECENT_QUESTIONS_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(question.to_string());
    }

    pub fn items(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

pub struct Gateway {
    config: ConfigStore,
    client: Client,
    registry: ChatRegistry,
    ocr: OcrClient,
    recent: Mutex<RecentQuestions>,
}

impl Gateway {
    /// Build a gateway over the shared configuration store.
    ///
    /// Base URL and model overrides are read once here; credentials are
    /// re-read from the store on every call, so a `reload()` after a
    /// credential save takes effect without rebuilding the gateway.
    pub fn new(config: ConfigStore) -> Self {
        let snapshot = config.snapshot();
        let registry = ChatRegistry::new(vec![
            Box::new(OpenRouterProvider::new(
                snapshot.openrouter.base_url.clone(),
                snapshot.openrouter.model.clone(),
            )),
            Box::new(GeminiProvider::new(
                snapshot.gemini.base_url.clone(),
                snapshot.gemini.model.clone(),
            )),
            Box::new(CerebrasProvider::new(
                snapshot.cerebras.base_url.clone(),
                snapshot.cerebras.model.clone(),
            )),
        ]);

        Self {
            config,
            client: Client::new(),
            registry,
            ocr: OcrClient::new(snapshot.ocrspace.base_url.clone()),
            recent: Mutex::new(RecentQuestions::default()),
        }
    }

    /// Generate an answer for `prompt` via the named chat provider.
    ///
    /// All failure modes collapse to an empty string here: an unrecognized
    /// provider id, a transport failure, a non-2xx status, an undecodable
    /// body, and a response missing the expected answer fields are
    /// indistinguishable to the caller.
    pub async fn generate_text(&self, prompt: &str, provider_id: &str) -> String {
        self.recent.lock().push(prompt);

        let Some(id) = ChatProviderId::from_str(provider_id) else {
            warn!("unrecognized chat provider id: {provider_id}");
            return String::new();
        };

        match self.generate(prompt, id).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!("chat provider {} failed: {err}", id.as_str());
                String::new()
            }
        }
    }

    /// Chat path with failure detail preserved.
    async fn generate(&self, prompt: &str, id: ChatProviderId) -> Result<String, ProviderError> {
        let provider = self
            .registry
            .get(id)
            .ok_or_else(|| ProviderError::UnsupportedProvider(id.as_str().to_string()))?;

        let config = self.config.snapshot();
        let api_key = config.chat_section(id).api_key.clone();
        let timeout = Duration::from_secs(config.request.chat_timeout);

        info!("sending prompt to {}", id.as_str());

        let response = provider
            .build_request(&self.client, &api_key, prompt)
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

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        provider
            .extract_answer(&body)
            .ok_or_else(|| ProviderError::Decode("answer fields missing from response".to_string()))
    }

    /// Extract text from an image via the named OCR provider.
    ///
    /// Only the OCR.space ids are accepted; anything else returns
    /// `UnsupportedProvider`. Failures on the supported path collapse to
    /// `Ok("")` like the chat boundary.
    pub async fn ocr_extract(
        &self,
        image_path: &Path,
        provider_id: &str,
    ) -> Result<String, ProviderError> {
        if !ocr::is_supported(provider_id) {
            return Err(ProviderError::UnsupportedProvider(provider_id.to_string()));
        }

        let config = self.config.snapshot();
        let api_key = config.ocrspace.api_key.clone();
        let timeout = Duration::from_secs(config.request.chat_timeout);

        match self
            .ocr
            .parse_image(&self.client, &api_key, image_path, timeout)
            .await
        {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!("OCR provider failed: {err}");
                Ok(String::new())
            }
        }
    }

    /// Resolve the machine's public-IP location; degraded record on failure.
    pub async fn resolve_location(&self) -> NormalizedLocation {
        let timeout = Duration::from_secs(self.config.snapshot().request.geo_timeout);
        geo::resolve_location(&self.client, timeout).await
    }

    /// Most recent question texts, oldest first.
    pub fn recent_questions(&self) -> Vec<String> {
        self.recent.lock().items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{serve_once, serve_once_status};
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, ConfigStore::load(&path).unwrap())
    }

    fn default_gateway() -> (TempDir, Gateway) {
        let (dir, store) = store_with("");
        (dir, Gateway::new(store))
    }

    #[tokio::test]
    async fn test_unrecognized_provider_returns_empty() {
        let (_dir, gateway) = default_gateway();
        assert_eq!(gateway.generate_text("question", "chatgpt").await, "");
    }

    #[tokio::test]
    async fn test_transport_failure_returns_empty() {
        let (_dir, store) = store_with(
            "[openrouter]\napi_key = \"k\"\nbase_url = \"http://127.0.0.1:1\"\n",
        );
        let gateway = Gateway::new(store);
        assert_eq!(gateway.generate_text("question", "openrouter").await, "");
    }

    #[tokio::test]
    async fn test_http_error_returns_empty() {
        let url = serve_once_status(500, "boom").await;
        let (_dir, store) = store_with(&format!(
            "[openrouter]\napi_key = \"k\"\nbase_url = \"{url}\"\n"
        ));
        let gateway = Gateway::new(store);
        assert_eq!(gateway.generate_text("question", "openrouter").await, "");
    }

    #[tokio::test]
    async fn test_missing_answer_fields_return_empty() {
        let url = serve_once(r#"{"choices":[]}"#).await;
        let (_dir, store) = store_with(&format!(
            "[cerebras]\napi_key = \"k\"\nbase_url = \"{url}\"\n"
        ));
        let gateway = Gateway::new(store);
        assert_eq!(gateway.generate_text("question", "cerebras").await, "");
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let url = serve_once(r#"{"choices":[{"message":{"content":"42"}}]}"#).await;
        let (_dir, store) = store_with(&format!(
            "[openrouter]\napi_key = \"k\"\nbase_url = \"{url}\"\n"
        ));
        let gateway = Gateway::new(store);
        assert_eq!(gateway.generate_text("meaning of life?", "openrouter").await, "42");
        assert_eq!(gateway.recent_questions(), vec!["meaning of life?"]);
    }

    #[tokio::test]
    async fn test_recent_questions_evict_oldest() {
        let (_dir, gateway) = default_gateway();
        for i in 1..=6 {
            // Unrecognized provider: no network touched, question still logged.
            gateway.generate_text(&format!("q{i}"), "nope").await;
        }
        assert_eq!(gateway.recent_questions(), vec!["q2", "q3", "q4", "q5", "q6"]);
    }

    #[tokio::test]
    async fn test_ocr_unsupported_provider_is_hard_error() {
        let (_dir, gateway) = default_gateway();
        let result = gateway.ocr_extract(Path::new("img.png"), "tesseract").await;
        assert!(matches!(result, Err(ProviderError::UnsupportedProvider(_))));
    }

    #[tokio::test]
    async fn test_ocr_missing_file_collapses_to_empty() {
        let (_dir, gateway) = default_gateway();
        let result = gateway
            .ocr_extract(Path::new("/nonexistent/img.png"), "ocrspace")
            .await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_ocr_empty_results_collapse_to_empty() {
        let url = serve_once(r#"{"ParsedResults":[]}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("shot.png");
        std::fs::write(&image, b"not a real png").unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("[ocrspace]\napi_key = \"k\"\nbase_url = \"{url}\"\n"),
        )
        .unwrap();
        let gateway = Gateway::new(ConfigStore::load(&config_path).unwrap());
        let result = gateway.ocr_extract(&image, "ocr.space").await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_ocr_successful_extraction() {
        let url = serve_once(r#"{"ParsedResults":[{"ParsedText":"captured text"}]}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("shot.png");
        std::fs::write(&image, b"not a real png").unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("[ocrspace]\napi_key = \"k\"\nbase_url = \"{url}\"\n"),
        )
        .unwrap();
        let gateway = Gateway::new(ConfigStore::load(&config_path).unwrap());
        let result = gateway.ocr_extract(&image, "ocrspace").await;
        assert_eq!(result.unwrap(), "captured text");
    }

    #[tokio::test]
    async fn test_credential_reload_visible_to_gateway() {
        let (dir, store) = store_with("[gemini]\napi_key = \"old\"\n");
        let gateway = Gateway::new(store.clone());
        store.set_api_key("gemini", "new-key").unwrap();
        store.reload().unwrap();
        assert_eq!(gateway.config.snapshot().gemini.api_key, "new-key");
        drop(dir);
    }
}
