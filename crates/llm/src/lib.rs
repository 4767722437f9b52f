//! Nusantara LLM Integration
//!
//! Provider-neutral text generation over Gemini and Ollama

mod factory;
mod gemini_client;
mod llm_trait;
mod ollama_client;
mod types;

pub use factory::build_client;
pub use gemini_client::GeminiClient;
pub use llm_trait::LlmClient;
pub use ollama_client::OllamaClient;
pub use types::{Completion, GenerateOptions, GenerateRequest};
