use chrono::{DateTime, Utc};
use nusantara_story::{AnalysisRecord, ObjectDescription, StyleTag};
use serde::{Deserialize, Serialize};

/// Narrative or story request
#[derive(Debug, Deserialize)]
pub struct NarrativeRequest {
    pub title: String,
    pub location: String,
    pub key_facts: String,

    /// Intended readers
    #[serde(default)]
    pub target_audience: Option<String>,

    /// Style name or label; absent means no preference
    #[serde(default)]
    pub style: Option<StyleTag>,
}

impl NarrativeRequest {
    pub fn into_description(self) -> ObjectDescription {
        let mut description = ObjectDescription::new(self.title, self.location, self.key_facts)
            .with_style(self.style.unwrap_or_default());
        if let Some(audience) = self.target_audience {
            description = description.with_audience(audience);
        }
        description
    }
}

/// Narrative response
#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub narrative: String,
}

/// Analysis request over an existing narrative
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub location: String,
    pub narrative: String,
}

/// Analysis response
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisRecord,
}

/// Full pipeline response
///
/// `analysis` is null when the analysis stage failed; the reason is then
/// in `analysis_error`.
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub request_id: String,
    pub generated_at: DateTime<Utc>,
    pub narrative: String,
    pub analysis: Option<AnalysisRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

/// Narrative PDF export request
#[derive(Debug, Deserialize)]
pub struct ExportNarrativeRequest {
    pub title: String,
    pub narrative: String,
}

/// Analysis PDF export request
#[derive(Debug, Deserialize)]
pub struct ExportAnalysisRequest {
    pub analysis: AnalysisRecord,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub reachable: bool,
}

/// Selectable narrative style
#[derive(Debug, Serialize)]
pub struct StyleOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrative_request_defaults() {
        let request: NarrativeRequest = serde_json::from_str(
            r#"{"title": "Tari Saman", "location": "Gayo Lues, Aceh", "key_facts": "Tarian seribu tangan"}"#,
        )
        .unwrap();

        let description = request.into_description();
        assert_eq!(description.audience(), None);
        assert_eq!(description.style, StyleTag::Unspecified);
    }

    #[test]
    fn test_narrative_request_accepts_style_label() {
        let request: NarrativeRequest = serde_json::from_str(
            r#"{"title": "Tari Saman", "location": "Aceh", "key_facts": "x",
                "target_audience": "Pelajar", "style": "Cerita Rakyat"}"#,
        )
        .unwrap();

        let description = request.into_description();
        assert_eq!(description.audience(), Some("Pelajar"));
        assert_eq!(description.style, StyleTag::Folklore);
    }

    #[test]
    fn test_story_response_omits_absent_error() {
        let response = StoryResponse {
            request_id: "id".into(),
            generated_at: Utc::now(),
            narrative: "Kisah".into(),
            analysis: None,
            analysis_error: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["analysis"].is_null());
        assert!(value.get("analysis_error").is_none());
    }
}
