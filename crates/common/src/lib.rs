pub mod config;
pub mod error;
pub mod locale;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, LlmProvider};
pub use error::NusantaraError;
pub use locale::Locale;
pub type Result<T> = std::result::Result<T, NusantaraError>;
