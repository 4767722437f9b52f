use nusantara_common::NusantaraError;

/// Why a raw analysis response could not be turned into an `AnalysisRecord`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    /// Nothing left after extraction
    #[error("response contains no payload")]
    NoPayload,

    /// Candidate is not valid JSON
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// Candidate parsed, but not as an object
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// Required category key absent
    #[error("missing required key \"{0}\"")]
    MissingKey(String),

    /// Category value is not an array
    #[error("value of \"{key}\" is not an array")]
    NotAnArray { key: String },

    /// An entry inside a category is unusable
    #[error("item {index} of \"{key}\" is invalid: {reason}")]
    InvalidItem {
        key: String,
        index: usize,
        reason: String,
    },
}

/// Failure of a narrative or analysis generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Required input missing; raised before any provider call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Provider declined, truncated to nothing, or answered empty
    #[error("Provider produced no text: {reason}")]
    ProviderRefusal { reason: String },

    /// Provider answered, but the analysis could not be recovered
    #[error("Malformed analysis response: {source}")]
    MalformedResponse {
        #[source]
        source: RecoveryError,
        raw: String,
    },

    /// Every analysis attempt failed
    #[error("Analysis unavailable after {attempts} attempt(s): {last_error}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last_error: Box<GenerationError>,
        last_raw: Option<String>,
    },

    /// Network, HTTP status or decoding failure talking to the provider
    #[error("Provider request failed: {0}")]
    ProviderTransport(#[source] NusantaraError),
}

impl GenerationError {
    /// Whether the analysis retry loop may absorb this failure
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderRefusal { .. } | Self::MalformedResponse { .. } | Self::ProviderTransport(_)
        )
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ProviderRefusal { .. } => 422,
            Self::MalformedResponse { .. } => 502,
            Self::ExhaustedRetries { .. } => 502,
            Self::ProviderTransport(_) => 503,
        }
    }

    /// Raw model text attached to this failure, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            Self::ExhaustedRetries { last_raw, .. } => last_raw.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_subset() {
        assert!(!GenerationError::Validation("title".into()).is_recoverable());
        assert!(GenerationError::ProviderRefusal { reason: "SAFETY".into() }.is_recoverable());
        assert!(GenerationError::ProviderTransport(NusantaraError::network("timeout")).is_recoverable());
        assert!(GenerationError::MalformedResponse {
            source: RecoveryError::NotAnObject,
            raw: "[]".into(),
        }
        .is_recoverable());

        let exhausted = GenerationError::ExhaustedRetries {
            attempts: 3,
            last_error: Box::new(GenerationError::ProviderRefusal { reason: "SAFETY".into() }),
            last_raw: None,
        };
        assert!(!exhausted.is_recoverable());
    }

    #[test]
    fn test_exhausted_exposes_last_raw() {
        let exhausted = GenerationError::ExhaustedRetries {
            attempts: 3,
            last_error: Box::new(GenerationError::MalformedResponse {
                source: RecoveryError::MissingKey("Poin Jual Utama".into()),
                raw: "{}".into(),
            }),
            last_raw: Some("{}".into()),
        };
        assert_eq!(exhausted.raw_response(), Some("{}"));
        assert_eq!(exhausted.status_code(), 502);
        assert!(exhausted.to_string().contains("3 attempt(s)"));
    }
}
