use crate::error::NusantaraError;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which LLM backend generates narratives and analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini REST API
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = NusantaraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(NusantaraError::config(format!(
                "Unknown LLM provider '{}', expected 'gemini' or 'ollama'",
                other
            ))),
        }
    }
}

/// Nusantara application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM backend
    pub llm_provider: LlmProvider,

    /// Google API key (Gemini only)
    #[serde(skip_serializing)]
    pub google_api_key: Option<String>,

    /// Gemini model name
    pub gemini_model: String,

    /// Gemini REST API base URL
    pub gemini_base_url: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Ollama model name
    pub ollama_model: String,

    /// Language of prompts and analysis keys
    pub locale: Locale,

    /// Maximum analysis attempts before giving up
    pub analysis_max_attempts: u32,

    /// Pause between analysis attempts (milliseconds)
    pub analysis_retry_delay_ms: u64,

    /// HTTP timeout for a single LLM call (seconds)
    pub request_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Directory for exported PDFs (CLI)
    pub output_dir: PathBuf,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::Gemini,
            google_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:latest".to_string(),
            locale: Locale::Indonesian,
            analysis_max_attempts: 3,
            analysis_retry_delay_ms: 1000,
            request_timeout_secs: 300,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            output_dir: PathBuf::from("./output"),
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, NusantaraError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to [`AppConfig::default`]. Keys that are set but
    /// fail to parse are reported instead of silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NusantaraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            // Provider selection
            llm_provider: match get("LLM_PROVIDER") {
                Some(v) => v.parse()?,
                None => defaults.llm_provider,
            },
            google_api_key: get("GOOGLE_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: get("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_base_url),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            // Generation behaviour
            locale: match get("CONTENT_LOCALE") {
                Some(v) => v.parse()?,
                None => defaults.locale,
            },
            analysis_max_attempts: parse_number(
                "ANALYSIS_MAX_ATTEMPTS",
                get("ANALYSIS_MAX_ATTEMPTS"),
                defaults.analysis_max_attempts,
            )?,
            analysis_retry_delay_ms: parse_number(
                "ANALYSIS_RETRY_DELAY_MS",
                get("ANALYSIS_RETRY_DELAY_MS"),
                defaults.analysis_retry_delay_ms,
            )?,
            request_timeout_secs: parse_number(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout_secs,
            )?,
            // Server and filesystem
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_number("SERVER_PORT", get("SERVER_PORT"), defaults.server_port)?,
            output_dir: get("OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), NusantaraError> {
        for dir in [&self.output_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    NusantaraError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get full path for an exported file
    pub fn get_output_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Pause between analysis attempts
    pub fn analysis_retry_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_retry_delay_ms)
    }

    /// Timeout applied to each LLM HTTP call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), NusantaraError> {
        // Validate provider settings
        match self.llm_provider {
            LlmProvider::Gemini => {
                // API key is mandatory for the hosted provider
                if self.google_api_key.is_none() {
                    return Err(NusantaraError::config(
                        "GOOGLE_API_KEY must be set to use the Gemini provider",
                    ));
                }
                check_http_url("Gemini base URL", &self.gemini_base_url)?;
                if self.gemini_model.is_empty() {
                    return Err(NusantaraError::config("Gemini model name cannot be empty"));
                }
            }
            LlmProvider::Ollama => {
                check_http_url("Ollama base URL", &self.ollama_base_url)?;
                if self.ollama_model.is_empty() {
                    return Err(NusantaraError::config("Ollama model name cannot be empty"));
                }
            }
        }

        // Validate retry bound
        if self.analysis_max_attempts == 0 {
            return Err(NusantaraError::config(
                "ANALYSIS_MAX_ATTEMPTS must be at least 1",
            ));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(NusantaraError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, NusantaraError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            NusantaraError::config(format!("{} has an invalid value: '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

fn check_http_url(name: &str, url: &str) -> Result<(), NusantaraError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(NusantaraError::config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.analysis_max_attempts, 3);
        assert_eq!(config.analysis_retry_delay(), Duration::from_secs(1));
        assert_eq!(config.locale, Locale::Indonesian);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("LLM_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://gpu-box:11434/"),
            ("CONTENT_LOCALE", "en"),
            ("ANALYSIS_MAX_ATTEMPTS", "5"),
            ("ANALYSIS_RETRY_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.llm_provider, LlmProvider::Ollama);
        assert_eq!(config.ollama_base_url, "http://gpu-box:11434");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.analysis_max_attempts, 5);
        assert_eq!(config.analysis_retry_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_treats_blank_as_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "  "),
            ("GOOGLE_API_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.google_api_key, None);
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let result = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        // Gemini without a key is not usable
        let config = AppConfig::default();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.google_api_key = Some("test-key".to_string());
        assert!(config.validate().is_ok());

        config.analysis_max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.llm_provider = LlmProvider::Ollama;
        config.ollama_base_url = "localhost:11434".to_string();
        assert!(config.validate().is_err());
    }
}
