use async_trait::async_trait;
use nusantara_common::{NusantaraError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{Completion, GenerateOptions, GenerateRequest};

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Ollama sampling options
#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl From<GenerateOptions> for OllamaOptions {
    fn from(options: GenerateOptions) -> Self {
        Self {
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            num_predict: options.max_output_tokens,
        }
    }
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    /// Generated text
    #[serde(default)]
    response: String,

    /// Why generation stopped ("stop", "length", ...)
    #[serde(default)]
    done_reason: Option<String>,
}

impl OllamaResponse {
    fn into_completion(self) -> Completion {
        if !self.response.is_empty() {
            return Completion::Text(self.response);
        }
        match self.done_reason {
            Some(finish_reason) => Completion::Refused { finish_reason },
            None => Completion::Empty,
        }
    }
}

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NusantaraError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self {
            base_url,
            model: model.into(),
            client,
        })
    }

    /// Single attempt to generate text
    async fn try_generate(&self, url: &str, request: &GenerateRequest) -> Result<Completion> {
        let body = OllamaRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: request.options.into(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NusantaraError::network(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| NusantaraError::network(format!("Ollama API error: {}", e)))?;

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| NusantaraError::llm(format!("Failed to parse response: {}", e)))?;

        Ok(result.into_completion())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Completion> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            self.model,
            request.prompt.len()
        );

        let completion = self.try_generate(&url, &request).await?;
        debug!("Ollama answered: {}", completion.describe());
        Ok(completion)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NusantaraError::network(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }

    fn describe(&self) -> String {
        format!("ollama/{}", self.model)
    }
}
