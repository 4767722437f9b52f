use async_trait::async_trait;
use nusantara_common::Result;

use crate::types::{Completion, GenerateRequest};

/// Common trait for LLM clients
///
/// `Err` is reserved for transport, HTTP status and decoding failures.
/// A provider that answers but declines to produce text returns
/// `Ok(Completion::Refused { .. })` or `Ok(Completion::Empty)`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, request: GenerateRequest) -> Result<Completion>;

    /// Test connection/availability
    async fn health_check(&self) -> Result<bool>;

    /// Provider and model, for logs and the health endpoint
    fn describe(&self) -> String;
}
