use nusantara_common::{AppConfig, Result};
use nusantara_llm::build_client;
use nusantara_story::StoryGenerator;

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Generator over the configured provider
    pub generator: StoryGenerator,
}

impl AppState {
    /// Create state with the provider selected by configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = build_client(&config)?;
        let generator = StoryGenerator::from_config(client, &config);
        Ok(Self::with_generator(config, generator))
    }

    /// Create state around an existing generator
    pub fn with_generator(config: AppConfig, generator: StoryGenerator) -> Self {
        Self { config, generator }
    }
}
