/// Nusantara error types
#[derive(Debug, thiserror::Error)]
pub enum NusantaraError {
    /// LLM provider returned something unusable
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),


    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// PDF rendering error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NusantaraError {
    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create PDF error
    pub fn pdf<S: Into<String>>(msg: S) -> Self {
        Self::Pdf(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl NusantaraError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::Network(_) => 503,
            Self::Llm(_) => 502,
            Self::Config(_) => 500,
            Self::Pdf(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NusantaraError::invalid_input("x").status_code(), 400);
        assert_eq!(NusantaraError::network("down").status_code(), 503);
        assert_eq!(NusantaraError::llm("garbage").status_code(), 502);
        assert_eq!(NusantaraError::pdf("font").status_code(), 500);
    }

    #[test]
    fn test_display_includes_message() {
        let err = NusantaraError::config("GOOGLE_API_KEY is not set");
        assert_eq!(err.to_string(), "Configuration error: GOOGLE_API_KEY is not set");
    }
}
