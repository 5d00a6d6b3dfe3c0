//! Fixed endpoints, default models, and bounds for the upstream services

/// OpenRouter chat completions API
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default OpenRouter model
pub const OPENROUTER_MODEL: &str = "openrouter/gpt-3.5-turbo";

/// Google Generative Language API
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const GEMINI_MODEL: &str = "gemini-pro";

/// Cerebras chat completions API
pub const CEREBRAS_BASE_URL: &str = "https://api.cerebras.ai/v1";

/// Default Cerebras model
pub const CEREBRAS_MODEL: &str = "llama2_70b";

/// OCR.space parse endpoint
pub const OCRSPACE_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// Default chat and OCR request timeout in seconds
pub const DEFAULT_CHAT_TIMEOUT: u64 = 60;

/// Default per-provider timeout for geolocation lookups in seconds
pub const DEFAULT_GEO_TIMEOUT: u64 = 5;

/// Capacity of the recent-questions list; oldest entries are evicted first
pub const RECENT_QUESTIONS_CAP: usize = 5;

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}
