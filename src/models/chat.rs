//! Chat completion data models
//!
//! Request and response structures for the chat providers. OpenRouter and
//! Cerebras speak the OpenAI chat-completions shape; Gemini has its own
//! `contents`/`parts` nesting. Response types are deliberately tolerant:
//! every field defaults, so a provider that omits keys deserializes into an
//! empty structure instead of failing outright.

use serde::{Deserialize, Serialize};

use crate::core::constants::role;

/// OpenAI-style chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-style chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Single-turn user prompt, the only shape this application sends.
    pub fn from_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: role::USER.to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// OpenAI-style chat completion response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiRequestContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequestContent {
    pub parts: Vec<GeminiRequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequestPart {
    pub text: String,
}

impl GeminiRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiRequestContent {
                parts: vec![GeminiRequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Gemini generateContent response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}
