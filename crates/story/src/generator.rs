use nusantara_common::{AppConfig, Locale};
use nusantara_llm::{Completion, GenerateOptions, GenerateRequest, LlmClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::GenerationError;
use crate::model::{AnalysisRecord, NarrativeResult, ObjectDescription};
use crate::prompts::{analysis_prompt, narrative_prompt, ANALYSIS_OPTIONS, NARRATIVE_OPTIONS};
use crate::recovery::recover;

/// Bounded blind retry for the analysis stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Fixed pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.analysis_max_attempts, config.analysis_retry_delay())
    }
}

/// Result of the full narrative-then-analysis pipeline
///
/// The narrative is always present; a failed analysis does not discard it.
#[derive(Debug)]
pub struct StoryOutcome {
    pub narrative: NarrativeResult,
    pub analysis: Result<AnalysisRecord, GenerationError>,
}

/// Narrative and analysis generator over any LLM client
#[derive(Clone)]
pub struct StoryGenerator {
    client: Arc<dyn LlmClient>,
    retry: RetryPolicy,
    locale: Locale,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("client", &self.client.describe())
            .field("retry", &self.retry)
            .field("locale", &self.locale)
            .finish()
    }
}

impl StoryGenerator {
    /// Create new generator
    pub fn new(client: Arc<dyn LlmClient>, retry: RetryPolicy, locale: Locale) -> Self {
        Self {
            client,
            retry,
            locale,
        }
    }

    /// Create generator with retry policy and locale taken from configuration
    pub fn from_config(client: Arc<dyn LlmClient>, config: &AppConfig) -> Self {
        Self::new(client, RetryPolicy::from_config(config), config.locale)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Provider description of the underlying client
    pub fn provider(&self) -> String {
        self.client.describe()
    }

    /// Check whether the provider is reachable
    pub async fn provider_reachable(&self) -> bool {
        match self.client.health_check().await {
            Ok(reachable) => reachable,
            Err(e) => {
                warn!("Provider health check failed: {}", e);
                false
            }
        }
    }

    /// Generate the narrative (single attempt)
    pub async fn generate_narrative(
        &self,
        description: &ObjectDescription,
    ) -> Result<NarrativeResult, GenerationError> {
        let prompt = narrative_prompt(description, self.locale)?;

        info!(
            "Generating narrative - Title: {}, Location: {}, Style: {}",
            description.title.trim(),
            description.location.trim(),
            description.style
        );

        let completion = self.call(prompt, NARRATIVE_OPTIONS).await.map_err(|e| {
            error!("Narrative generation failed: {}", e);
            e
        })?;

        match completion {
            Completion::Text(text) if !text.trim().is_empty() => {
                info!("Narrative generated - Length: {} chars", text.len());
                NarrativeResult::new(text)
            }
            Completion::Refused { finish_reason } => {
                warn!("Provider refused to write narrative. Finish reason: {}", finish_reason);
                Err(GenerationError::ProviderRefusal {
                    reason: finish_reason,
                })
            }
            Completion::Text(_) | Completion::Empty => {
                warn!("Provider returned an empty narrative");
                Err(GenerationError::ProviderRefusal {
                    reason: "empty response".to_string(),
                })
            }
        }
    }

    /// Generate the structured analysis, retrying recoverable failures
    pub async fn generate_analysis(
        &self,
        location: &str,
        narrative: &NarrativeResult,
    ) -> Result<AnalysisRecord, GenerationError> {
        if location.trim().is_empty() {
            return Err(GenerationError::Validation(
                "required field(s) empty: location".to_string(),
            ));
        }

        let prompt = analysis_prompt(location, narrative, self.locale);
        let max_attempts = self.retry.max_attempts.max(1);

        debug!(
            "Analysis prompt built - Length: {} chars, Max attempts: {}",
            prompt.len(),
            max_attempts
        );

        let mut last_error = None;
        let mut last_raw = None;

        for attempt in 1..=max_attempts {
            match self.attempt_analysis(&prompt).await {
                Ok(record) => {
                    info!(
                        "Analysis recovered on attempt {}/{} - Items: {}",
                        attempt,
                        max_attempts,
                        record.item_count()
                    );
                    return Ok(record);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Attempt {}/{}: analysis failed: {}", attempt, max_attempts, e);
                    if let Some(raw) = e.raw_response() {
                        debug!("Raw analysis response:\n{}", raw);
                        last_raw = Some(raw.to_string());
                    }
                    last_error = Some(e);

                    if attempt < max_attempts && !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        error!("All {} attempts to obtain a valid analysis failed", max_attempts);

        let last_error = last_error.unwrap_or_else(|| GenerationError::ProviderRefusal {
            reason: "no attempt was made".to_string(),
        });
        Err(GenerationError::ExhaustedRetries {
            attempts: max_attempts,
            last_error: Box::new(last_error),
            last_raw,
        })
    }

    /// Narrative first, then analysis against it
    ///
    /// A narrative failure ends the pipeline; an analysis failure is
    /// reported inside the outcome.
    pub async fn generate_story(
        &self,
        description: &ObjectDescription,
    ) -> Result<StoryOutcome, GenerationError> {
        let narrative = self.generate_narrative(description).await?;
        let analysis = self
            .generate_analysis(&description.location, &narrative)
            .await;

        if let Err(e) = &analysis {
            warn!("Continuing without analysis: {}", e);
        }

        Ok(StoryOutcome {
            narrative,
            analysis,
        })
    }

    /// One request/extract/parse/validate cycle
    async fn attempt_analysis(&self, prompt: &str) -> Result<AnalysisRecord, GenerationError> {
        let raw = match self.call(prompt.to_string(), ANALYSIS_OPTIONS).await? {
            Completion::Text(text) if !text.trim().is_empty() => text,
            Completion::Refused { finish_reason } => {
                return Err(GenerationError::ProviderRefusal {
                    reason: finish_reason,
                })
            }
            Completion::Text(_) | Completion::Empty => {
                return Err(GenerationError::ProviderRefusal {
                    reason: "empty response".to_string(),
                })
            }
        };

        recover(&raw, self.locale).map_err(|source| GenerationError::MalformedResponse { source, raw })
    }

    async fn call(
        &self,
        prompt: String,
        options: GenerateOptions,
    ) -> Result<Completion, GenerationError> {
        self.client
            .generate(GenerateRequest::new(prompt, options))
            .await
            .map_err(GenerationError::ProviderTransport)
    }
}
