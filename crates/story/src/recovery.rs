//! Recovery of an `AnalysisRecord` from free-form model output.
//!
//! Extraction is two-phase:
//! 1. the body of the first fenced block tagged `json` (closing fence
//!    optional, since long answers get truncated), otherwise
//! 2. the whole response text.
//!
//! The candidate is then parsed as a JSON object and checked against the
//! five-category schema for the requested locale.

use nusantara_common::Locale;
use serde_json::{Map, Value};

use crate::error::RecoveryError;
use crate::model::{item_field_names, AnalysisCategory, AnalysisItem, AnalysisRecord};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Parse and validate an analysis record out of raw model text
pub fn recover(raw: &str, locale: Locale) -> Result<AnalysisRecord, RecoveryError> {
    let candidate = extract_candidate(raw);
    if candidate.is_empty() {
        return Err(RecoveryError::NoPayload);
    }

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| RecoveryError::InvalidJson(e.to_string()))?;
    record_from_value(&value, locale)
}

/// Check a parsed payload against the five-category schema of `locale`
pub(crate) fn record_from_value(value: &Value, locale: Locale) -> Result<AnalysisRecord, RecoveryError> {
    let object = value.as_object().ok_or(RecoveryError::NotAnObject)?;

    let mut sections: [Vec<AnalysisItem>; 5] = Default::default();
    for (slot, category) in sections.iter_mut().zip(AnalysisCategory::ALL) {
        let key = category.key(locale);
        let entries = object
            .get(key)
            .ok_or_else(|| RecoveryError::MissingKey(key.to_string()))?
            .as_array()
            .ok_or_else(|| RecoveryError::NotAnArray {
                key: key.to_string(),
            })?;

        *slot = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_item(key, index, entry, locale))
            .collect::<Result<Vec<_>, _>>()?;
    }

    AnalysisRecord::from_sections(locale, sections)
}

/// Candidate payload: fenced `json` block body if present, else the whole text
pub fn extract_candidate(raw: &str) -> &str {
    find_json_fence(raw).unwrap_or(raw).trim()
}

fn find_json_fence(raw: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = raw[search_from..].find(FENCE) {
        let tag_start = search_from + offset + FENCE.len();
        let tag_end = tag_start + JSON_TAG.len();

        // `json` must be the whole tag, not a prefix of `jsonc` or `json5`
        let tagged = raw
            .get(tag_start..tag_end)
            .map_or(false, |tag| tag.eq_ignore_ascii_case(JSON_TAG))
            && raw[tag_end..].chars().next().map_or(true, char::is_whitespace);

        if tagged {
            let body = &raw[tag_end..];
            return Some(match body.find(FENCE) {
                Some(end) => &body[..end],
                None => body,
            });
        }

        search_from = tag_start;
    }

    None
}

fn parse_item(key: &str, index: usize, entry: &Value, locale: Locale) -> Result<AnalysisItem, RecoveryError> {
    let invalid = |reason: String| RecoveryError::InvalidItem {
        key: key.to_string(),
        index,
        reason,
    };

    let object = entry
        .as_object()
        .ok_or_else(|| invalid("not an object".to_string()))?;

    let (point_name, description_name) = item_field_names(locale);
    let (point_alias, description_alias) = item_field_names(other_locale(locale));

    let point = text_field(object, point_name, point_alias).map_err(&invalid)?;
    let description = text_field(object, description_name, description_alias).map_err(&invalid)?;

    Ok(AnalysisItem { point, description })
}

fn text_field(object: &Map<String, Value>, name: &str, alias: &str) -> Result<String, String> {
    let value = object
        .get(name)
        .or_else(|| object.get(alias))
        .ok_or_else(|| format!("missing \"{}\"", name))?;

    match value {
        Value::String(text) if !text.trim().is_empty() => Ok(text.clone()),
        Value::String(_) => Err(format!("\"{}\" is empty", name)),
        _ => Err(format!("\"{}\" is not a string", name)),
    }
}

fn other_locale(locale: Locale) -> Locale {
    match locale {
        Locale::Indonesian => Locale::English,
        Locale::English => Locale::Indonesian,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn english_payload() -> Value {
        json!({
            "Main Selling Points": [
                { "point": "Sunrise", "description": "Sea of clouds at dawn." },
                { "point": "Tengger Culture", "description": "Yadnya Kasada ceremony." }
            ],
            "Ideal Visitor Segments": [
                { "point": "Photographers", "description": "Chasing golden hour." }
            ],
            "Monetization & Tourism Product Ideas": [
                { "point": "Jeep Tours", "description": "Run by local cooperatives." }
            ],
            "Promotional Message Improvement Suggestions": [
                { "point": "Storytelling", "description": "Lead with Tengger legends." }
            ],
            "Local Collaboration Potential": [
                { "point": "Homestays", "description": "Partner with village families." }
            ]
        })
    }

    fn fenced(payload: &Value) -> String {
        format!(
            "Here is the analysis you asked for:\n```json\n{}\n```\nLet me know if you need more.",
            serde_json::to_string_pretty(payload).unwrap()
        )
    }

    #[test]
    fn test_fenced_payload_round_trips_exactly() {
        let payload = english_payload();
        let record = recover(&fenced(&payload), Locale::English).unwrap();

        for category in AnalysisCategory::ALL {
            let expected = payload[category.key(Locale::English)].as_array().unwrap();
            let items = record.items(category);
            assert_eq!(items.len(), expected.len());
            for (item, raw) in items.iter().zip(expected) {
                assert_eq!(item.point, raw["point"].as_str().unwrap());
                assert_eq!(item.description, raw["description"].as_str().unwrap());
            }
        }
        assert_eq!(record.items(AnalysisCategory::MainSellingPoints)[1].point, "Tengger Culture");
    }

    #[test]
    fn test_bare_json_without_fence() {
        let raw = english_payload().to_string();
        let record = recover(&raw, Locale::English).unwrap();
        assert_eq!(record.item_count(), 6);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let mut payload = english_payload();
        payload.as_object_mut().unwrap().remove("Local Collaboration Potential");

        let err = recover(&fenced(&payload), Locale::English).unwrap_err();
        assert_eq!(err, RecoveryError::MissingKey("Local Collaboration Potential".to_string()));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let raw = english_payload()
            .to_string()
            .replace("Main Selling Points", "main selling points");
        assert_eq!(
            recover(&raw, Locale::English).unwrap_err(),
            RecoveryError::MissingKey("Main Selling Points".to_string())
        );
    }

    #[test]
    fn test_missing_description_is_rejected() {
        let mut payload = english_payload();
        payload["Ideal Visitor Segments"][0]
            .as_object_mut()
            .unwrap()
            .remove("description");

        let err = recover(&fenced(&payload), Locale::English).unwrap_err();
        assert_eq!(
            err,
            RecoveryError::InvalidItem {
                key: "Ideal Visitor Segments".to_string(),
                index: 0,
                reason: "missing \"description\"".to_string(),
            }
        );
    }

    #[test]
    fn test_string_item_is_rejected() {
        let mut payload = english_payload();
        payload["Main Selling Points"] = json!(["Sunrise"]);
        assert!(matches!(
            recover(&payload.to_string(), Locale::English),
            Err(RecoveryError::InvalidItem { index: 0, .. })
        ));
    }

    #[test]
    fn test_non_array_value_is_rejected() {
        let mut payload = english_payload();
        payload["Monetization & Tourism Product Ideas"] = json!("Jeep tours");
        assert_eq!(
            recover(&payload.to_string(), Locale::English).unwrap_err(),
            RecoveryError::NotAnArray {
                key: "Monetization & Tourism Product Ideas".to_string()
            }
        );
    }

    #[test]
    fn test_indonesian_keys_and_field_names() {
        let raw = r#"```JSON
{
  "Poin Jual Utama": [{ "poin": "Api Biru", "deskripsi": "Hanya ada dua di dunia." }],
  "Segmen Wisatawan Ideal": [{ "poin": "Petualang", "deskripsi": "Pendakian malam." }],
  "Ide Monetisasi & Produk Pariwisata": [{ "point": "Masker Gas", "description": "Disewakan di pos Paltuding." }],
  "Saran Peningkatan Pesan Promosi": [],
  "Potensi Kolaborasi Lokal": [{ "poin": "Penambang", "deskripsi": "Pemandu bersertifikat." }]
}
```"#;
        let record = recover(raw, Locale::Indonesian).unwrap();
        assert_eq!(record.locale(), Locale::Indonesian);
        assert_eq!(record.items(AnalysisCategory::MonetizationIdeas)[0].point, "Masker Gas");
        assert!(record.items(AnalysisCategory::PromotionalImprovements).is_empty());
    }

    #[test]
    fn test_english_keys_do_not_satisfy_indonesian_schema() {
        let raw = english_payload().to_string();
        assert_eq!(
            recover(&raw, Locale::Indonesian).unwrap_err(),
            RecoveryError::MissingKey("Poin Jual Utama".to_string())
        );
    }

    #[test]
    fn test_extract_candidate_strategies() {
        assert_eq!(extract_candidate("noise ```json\n{\"a\":1}\n``` tail"), "{\"a\":1}");
        // Truncated: no closing fence
        assert_eq!(extract_candidate("```json\n{\"a\":"), "{\"a\":");
        // Untagged fence is not an anchor; first tagged one wins
        assert_eq!(
            extract_candidate("```text\nhello\n```\n```json\n{}\n```"),
            "{}"
        );
        assert_eq!(extract_candidate("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_json_tag_must_be_whole_word() {
        // `jsonc` / `json5` blocks are skipped in favour of a real `json` one
        assert_eq!(
            extract_candidate("```jsonc\n{bad}\n```\n```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(extract_candidate("```json5\n{}\n```"), "```json5\n{}\n```");
        assert_eq!(extract_candidate("```json"), "");

        let raw = format!("```jsonc\n// draft\n```\n```json\n{}\n```", english_payload());
        assert_eq!(recover(&raw, Locale::English).unwrap().item_count(), 6);
    }

    #[test]
    fn test_prose_around_unfenced_json_fails_to_parse() {
        let raw = format!("Sure! {}", english_payload());
        assert!(matches!(recover(&raw, Locale::English), Err(RecoveryError::InvalidJson(_))));
    }

    #[test]
    fn test_blank_and_non_object_payloads() {
        assert_eq!(recover("   ", Locale::English).unwrap_err(), RecoveryError::NoPayload);
        assert_eq!(recover("```json\n```", Locale::English).unwrap_err(), RecoveryError::NoPayload);
        assert_eq!(recover("[1, 2]", Locale::English).unwrap_err(), RecoveryError::NotAnObject);
    }

    #[test]
    fn test_multibyte_text_near_fence() {
        let raw = format!("Analisis 👉```json\n{}\n```", english_payload());
        assert!(recover(&raw, Locale::English).is_ok());
        assert_eq!(extract_candidate("```é"), "```é");
    }
}
