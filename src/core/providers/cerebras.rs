//! Cerebras provider implementation
//!
//! Same OpenAI-shaped wire format as OpenRouter, different endpoint and
//! default model.

use crate::core::constants;
use crate::core::provider::{ChatProvider, ChatProviderId};
use crate::models::chat::{ChatCompletionRequest, ChatCompletionResponse};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

pub struct CerebrasProvider {
    endpoint: String,
    model: String,
}

impl CerebrasProvider {
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| constants::CEREBRAS_BASE_URL.to_string());
        Self {
            endpoint: format!("{base}/chat/completions"),
            model: model.unwrap_or_else(|| constants::CEREBRAS_MODEL.to_string()),
        }
    }
}

impl ChatProvider for CerebrasProvider {
    fn id(&self) -> ChatProviderId {
        ChatProviderId::Cerebras
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
