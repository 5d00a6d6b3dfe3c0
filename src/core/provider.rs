//! Provider abstraction layer for the chat completion services
//!
//! This module defines the error taxonomy shared by every upstream call and
//! a common trait for the chat providers (OpenRouter, Gemini, Cerebras),
//! selected at runtime through a registry keyed by provider id.

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use thiserror::Error;

/// Error types for upstream provider operations
///
/// Everything except `UnsupportedProvider` is swallowed at the gateway
/// boundary and surfaced to the consumer as an empty result; the detail is
/// kept here for logging and tests.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("decode failure: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
}

/// Supported chat providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatProviderId {
    OpenRouter,
    Gemini,
    Cerebras,
}

impl ChatProviderId {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Some(ChatProviderId::OpenRouter),
            "gemini" => Some(ChatProviderId::Gemini),
            "cerebras" => Some(ChatProviderId::Cerebras),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatProviderId::OpenRouter => "openrouter",
            ChatProviderId::Gemini => "gemini",
            ChatProviderId::Cerebras => "cerebras",
        }
    }
}

/// Trait for chat completion providers
///
/// Implementations own their endpoint, auth mechanism, and payload shape;
/// the gateway owns the send/decode cycle so failure handling stays uniform
/// across providers.
pub trait ChatProvider: Send + Sync {
    fn id(&self) -> ChatProviderId;

    /// Build the authenticated HTTP request carrying `prompt`.
    fn build_request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder;

    /// Pull the first completion's text out of the raw response body.
    /// `None` when the expected keys are absent at any level.
    fn extract_answer(&self, body: &Value) -> Option<String>;
}

/// Lookup table of chat providers keyed by id
pub struct ChatRegistry {
    providers: Vec<Box<dyn ChatProvider>>,
}

impl ChatRegistry {
    pub fn new(providers: Vec<Box<dyn ChatProvider>>) -> Self {
        Self { providers }
    }

    pub fn get(&self, id: ChatProviderId) -> Option<&dyn ChatProvider> {
        self.providers
            .iter()
            .find(|provider| provider.id() == id)
            .map(|provider| provider.as_ref())
    }
}
