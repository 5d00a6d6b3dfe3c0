//! Gemini provider implementation
//!
//! Gemini differs from the other chat providers on both sides of the wire:
//! the API key travels as a `key` query parameter instead of a bearer
//! header, and the payload nests `contents` -> `parts` -> `text`.

use crate::core::constants;
use crate::core::provider::{ChatProvider, ChatProviderId};
use crate::models::chat::{GeminiRequest, GeminiResponse};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

pub struct GeminiProvider {
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| constants::GEMINI_BASE_URL.to_string());
        let model = model.unwrap_or_else(|| constants::GEMINI_MODEL.to_string());
        Self {
            endpoint: format!("{base}/models/{model}:generateContent"),
        }
    }
}

impl ChatProvider for GeminiProvider {
    fn id(&self) -> ChatProviderId {
        ChatProviderId::Gemini
    }

    fn build_request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder {
        client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&GeminiRequest::from_prompt(prompt))
    }

    fn extract_answer(&self, body: &Value) -> Option<String> {
        let parsed: GeminiResponse = serde_json::from_value(body.clone()).ok()?;
        parsed
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(None, None)
    }

    #[test]
    fn test_extract_first_candidate_text() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "Paris"}, {"text": "ignored"}]}}
            ]
        });
        assert_eq!(provider().extract_answer(&body), Some("Paris".to_string()));
    }

    #[test]
    fn test_extract_empty_candidates() {
        assert_eq!(provider().extract_answer(&json!({"candidates": []})), None);
    }

    #[test]
    fn test_extract_candidate_without_content() {
        let body = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert_eq!(provider().extract_answer(&body), None);
    }

    #[test]
    fn test_extract_part_without_text() {
        let body = json!({"candidates": [{"content": {"parts": [{}]}}]});
        assert_eq!(provider().extract_answer(&body), None);
    }
}
