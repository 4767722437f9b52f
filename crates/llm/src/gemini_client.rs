use async_trait::async_trait;
use nusantara_common::{NusantaraError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{Completion, GenerateOptions, GenerateRequest};

// --- Gemini wire format ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

impl From<GenerateOptions> for GenerationConfig {
    fn from(options: GenerateOptions) -> Self {
        Self {
            max_output_tokens: options.max_output_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Collapse the response into the provider-neutral outcome
    fn into_completion(self) -> Completion {
        let first = self.candidates.into_iter().next();

        if let Some(candidate) = first {
            let text: String = candidate
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter_map(|part| part.text)
                        .collect()
                })
                .unwrap_or_default();

            if !text.is_empty() {
                return Completion::Text(text);
            }
            if let Some(finish_reason) = candidate.finish_reason {
                return Completion::Refused { finish_reason };
            }
        }

        match self.prompt_feedback.and_then(|f| f.block_reason) {
            Some(block_reason) => Completion::Refused {
                finish_reason: block_reason,
            },
            None => Completion::Empty,
        }
    }
}

// --- Client ---

/// Google Gemini REST client
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create new Gemini client
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NusantaraError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Gemini client initialized: {} ({})", model, base_url);
        Ok(Self {
            base_url,
            model,
            api_key: api_key.into(),
            client,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Single attempt to generate text
    async fn try_generate(&self, request: &GenerateRequest) -> Result<Completion> {
        let body = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.options.into(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| NusantaraError::network(format!("Failed to send request to Gemini: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NusantaraError::network(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| NusantaraError::llm(format!("Failed to parse Gemini response: {}", e)))?;

        Ok(parsed.into_completion())
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Completion> {
        debug!(
            "Sending generateContent request - Model: {}, Prompt length: {}",
            self.model,
            request.prompt.len()
        );

        let completion = self.try_generate(&request).await?;
        debug!("Gemini answered: {}", completion.describe());
        Ok(completion)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let response = self
            .client
            .get(&url)
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| NusantaraError::network(format!("Failed to connect to Gemini: {}", e)))?;
        Ok(response.status().is_success())
    }

    fn describe(&self) -> String {
        format!("gemini/{}", self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Completion {
        serde_json::from_str::<GeminiResponse>(json)
            .unwrap()
            .into_completion()
    }

    #[test]
    fn test_concatenates_parts() {
        let completion = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Halo "},{"text":"Bromo"}],"role":"model"},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(completion, Completion::Text("Halo Bromo".to_string()));
    }

    #[test]
    fn test_finish_reason_without_parts_is_refusal() {
        let completion = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert_eq!(
            completion,
            Completion::Refused {
                finish_reason: "SAFETY".to_string()
            }
        );
    }

    #[test]
    fn test_blocked_prompt_is_refusal() {
        let completion = parse(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#);
        assert_eq!(
            completion,
            Completion::Refused {
                finish_reason: "OTHER".to_string()
            }
        );
    }

    #[test]
    fn test_nothing_at_all_is_empty() {
        assert_eq!(parse("{}"), Completion::Empty);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new(
            "http://localhost:1",
            "gemini-2.5-flash",
            "secret-key",
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
        assert_eq!(client.describe(), "gemini/gemini-2.5-flash");
    }
}
