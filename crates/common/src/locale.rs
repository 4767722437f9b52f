use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NusantaraError;

/// Language used for prompts, analysis keys and exported documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Bahasa Indonesia
    #[default]
    #[serde(alias = "id")]
    Indonesian,

    /// English
    #[serde(alias = "en")]
    English,
}

impl Locale {
    /// Short language code
    pub fn code(self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = NusantaraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" | "indonesian" | "indonesia" => Ok(Self::Indonesian),
            "en" | "english" => Ok(Self::English),
            other => Err(NusantaraError::config(format!(
                "Unknown content locale '{}', expected 'id' or 'en'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert_eq!("English".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::English);
        assert_eq!(serde_json::to_string(&Locale::Indonesian).unwrap(), "\"indonesian\"");
    }
}
