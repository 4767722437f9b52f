use serde::Serialize;

/// Provider-neutral text generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    /// Prompt text
    pub prompt: String,

    /// Sampling options
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Create new request
    pub fn new(prompt: impl Into<String>, options: GenerateOptions) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }
}

/// Generation options
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GenerateOptions {
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// What the provider handed back for a request that reached it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Usable text
    Text(String),

    /// Provider stopped without producing text (safety block, length, ...)
    Refused {
        /// Provider-specific finish/block reason
        finish_reason: String,
    },

    /// No text and no explanation
    Empty,
}

impl Completion {
    /// Short description used in logs
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => format!("{} chars of text", text.len()),
            Self::Refused { finish_reason } => format!("refused ({})", finish_reason),
            Self::Empty => "empty response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_for_logs() {
        assert_eq!(Completion::Text("Halo".to_string()).describe(), "4 chars of text");
        assert_eq!(
            Completion::Refused {
                finish_reason: "SAFETY".to_string()
            }
            .describe(),
            "refused (SAFETY)"
        );
        assert_eq!(Completion::Empty.describe(), "empty response");
    }

    #[test]
    fn test_options_skip_unset_fields() {
        let options = GenerateOptions {
            temperature: Some(0.4),
            ..Default::default()
        };
        let json = serde_json::to_value(options).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("temperature"));
    }
}
