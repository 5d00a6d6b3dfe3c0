//! OpenRouter provider implementation

use crate::core::constants;
use crate::core::provider::{ChatProvider, ChatProviderId};
use crate::models::chat::{ChatCompletionRequest, ChatCompletionResponse};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// OpenRouter chat provider: OpenAI-shaped payload, bearer-token auth
pub struct OpenRouterProvider {
    endpoint: String,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| constants::OPENROUTER_BASE_URL.to_string());
        Self {
            endpoint: format!("{base}/chat/completions"),
            model: model.unwrap_or_else(|| constants::OPENROUTER_MODEL.to_string()),
        }
    }
}

impl ChatProvider for OpenRouterProvider {
    fn id(&self) -> ChatProviderId {
        ChatProviderId::OpenRouter
    }

    fn build_request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder {
        client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&ChatCompletionRequest::from_prompt(&self.model, prompt))
    }

    fn extract_answer(&self, body: &Value) -> Option<String> {
        let parsed: ChatCompletionResponse = serde_json::from_value(body.clone()).ok()?;
        parsed.choices.into_iter().next()?.message?.content
    }
}
