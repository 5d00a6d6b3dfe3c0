//! Chat provider implementations

pub mod cerebras;
pub mod gemini;
pub mod openrouter;

pub use cerebras::CerebrasProvider;
pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;
