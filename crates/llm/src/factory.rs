use nusantara_common::{AppConfig, LlmProvider, NusantaraError, Result};
use std::sync::Arc;
use tracing::info;

use crate::gemini_client::GeminiClient;
use crate::llm_trait::LlmClient;
use crate::ollama_client::OllamaClient;

/// Build the configured LLM client
pub fn build_client(config: &AppConfig) -> Result<Arc<dyn LlmClient>> {
    let client: Arc<dyn LlmClient> = match config.llm_provider {
        LlmProvider::Gemini => {
            let api_key = config.google_api_key.clone().ok_or_else(|| {
                NusantaraError::config("GOOGLE_API_KEY must be set to use the Gemini provider")
            })?;
            Arc::new(GeminiClient::new(
                &config.gemini_base_url,
                &config.gemini_model,
                api_key,
                config.request_timeout(),
            )?)
        }
        LlmProvider::Ollama => Arc::new(OllamaClient::new(
            &config.ollama_base_url,
            &config.ollama_model,
            config.request_timeout(),
        )?),
    };

    info!("Using LLM provider: {}", client.describe());
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_requires_api_key() {
        let config = AppConfig::default();
        assert!(build_client(&config).is_err());
    }

    #[test]
    fn test_builds_selected_provider() {
        let mut config = AppConfig::default();
        config.google_api_key = Some("k".to_string());
        assert_eq!(build_client(&config).unwrap().describe(), "gemini/gemini-2.5-flash");

        config.llm_provider = LlmProvider::Ollama;
        assert_eq!(build_client(&config).unwrap().describe(), "ollama/llama3.2:latest");
    }
}
