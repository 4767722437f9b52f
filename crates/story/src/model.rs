use nusantara_common::Locale;
use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{GenerationError, RecoveryError};
use crate::recovery::record_from_value;

/// Narrative style requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StyleTag {
    Educational,
    Promotional,
    Folklore,
    Poetic,
    Informative,
    Inspirational,
    #[default]
    Unspecified,
}

impl StyleTag {
    /// Every selectable style, in menu order
    pub const ALL: [StyleTag; 6] = [
        StyleTag::Educational,
        StyleTag::Promotional,
        StyleTag::Folklore,
        StyleTag::Poetic,
        StyleTag::Informative,
        StyleTag::Inspirational,
    ];

    pub fn is_specified(self) -> bool {
        self != StyleTag::Unspecified
    }

    /// Stable machine name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Educational => "educational",
            Self::Promotional => "promotional",
            Self::Folklore => "folklore",
            Self::Poetic => "poetic",
            Self::Informative => "informative",
            Self::Inspirational => "inspirational",
            Self::Unspecified => "unspecified",
        }
    }

    /// Menu label
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Indonesian, Self::Educational) => "Edukasi",
            (Locale::Indonesian, Self::Promotional) => "Promosi",
            (Locale::Indonesian, Self::Folklore) => "Cerita Rakyat",
            (Locale::Indonesian, Self::Poetic) => "Puitis",
            (Locale::Indonesian, Self::Informative) => "Informatif",
            (Locale::Indonesian, Self::Inspirational) => "Inspiratif",
            (Locale::Indonesian, Self::Unspecified) => "Pilih Gaya",
            (Locale::English, Self::Educational) => "Educational",
            (Locale::English, Self::Promotional) => "Promotional",
            (Locale::English, Self::Folklore) => "Folklore",
            (Locale::English, Self::Poetic) => "Poetic",
            (Locale::English, Self::Informative) => "Informative",
            (Locale::English, Self::Inspirational) => "Inspirational",
            (Locale::English, Self::Unspecified) => "Unspecified",
        }
    }

    /// What the style means for the writer; appended to the style directive
    pub fn guidance(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Indonesian, Self::Educational) => {
                "fokus pada fakta, sejarah, dan penjelasan yang mudah dimengerti"
            }
            (Locale::Indonesian, Self::Promotional) => {
                "bahasa persuasif yang menarik minat wisatawan"
            }
            (Locale::Indonesian, Self::Folklore) => "nuansa dongeng atau legenda setempat",
            (Locale::Indonesian, Self::Poetic) => "bahasa indah, metafora, dan kesan artistik",
            (Locale::Indonesian, Self::Informative) => {
                "ringkas, padat informasi, fokus pada data dan fakta"
            }
            (Locale::Indonesian, Self::Inspirational) => {
                "membangkitkan semangat dan mengajak pembaca merasakan pengalaman"
            }
            (Locale::English, Self::Educational) => {
                "focus on facts, history and easy-to-follow explanations"
            }
            (Locale::English, Self::Promotional) => "persuasive language that draws visitors in",
            (Locale::English, Self::Folklore) => "the feel of a local tale or legend",
            (Locale::English, Self::Poetic) => "lyrical language, metaphor and an artistic tone",
            (Locale::English, Self::Informative) => "concise and dense with facts and figures",
            (Locale::English, Self::Inspirational) => {
                "uplifting, inviting the reader to feel the experience"
            }
            (_, Self::Unspecified) => "",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleTag {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let style = match normalized.as_str() {
            "" | "unspecified" | "pilih gaya" => Self::Unspecified,
            "educational" | "edukasi" => Self::Educational,
            "promotional" | "promosi" => Self::Promotional,
            "folklore" | "cerita rakyat" => Self::Folklore,
            "poetic" | "puitis" => Self::Poetic,
            "informative" | "informatif" => Self::Informative,
            "inspirational" | "inspiratif" => Self::Inspirational,
            _ => {
                return Err(GenerationError::Validation(format!(
                    "unknown narrative style '{}'",
                    s.trim()
                )))
            }
        };
        Ok(style)
    }
}

impl TryFrom<String> for StyleTag {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Facts about a cultural or tourism object, as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescription {
    /// Object name
    pub title: String,

    /// Where the object is
    pub location: String,

    /// Key points, history, notable details
    pub key_facts: String,

    /// Intended readers; blank means a general audience
    #[serde(default)]
    pub target_audience: String,

    /// Requested narrative style
    #[serde(default)]
    pub style: StyleTag,
}

impl ObjectDescription {
    /// Create description with general audience and no style preference
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        key_facts: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            key_facts: key_facts.into(),
            target_audience: String::new(),
            style: StyleTag::Unspecified,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    pub fn with_style(mut self, style: StyleTag) -> Self {
        self.style = style;
        self
    }

    /// Audience, if one was given
    pub fn audience(&self) -> Option<&str> {
        let audience = self.target_audience.trim();
        (!audience.is_empty()).then_some(audience)
    }

    /// Check that title, location and key facts are filled in
    pub fn validate(&self) -> Result<(), GenerationError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("location", &self.location),
            ("key_facts", &self.key_facts),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::Validation(format!(
                "required field(s) empty: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Generated narrative text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeResult {
    text: String,
}

impl NarrativeResult {
    /// Wrap narrative text; blank text is rejected
    pub fn new(text: impl Into<String>) -> Result<Self, GenerationError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::Validation("narrative text is empty".to_string()));
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// The five fixed dimensions of a promotional analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisCategory {
    MainSellingPoints,
    IdealVisitorSegments,
    MonetizationIdeas,
    PromotionalImprovements,
    LocalCollaboration,
}

impl AnalysisCategory {
    /// All categories in record order
    pub const ALL: [AnalysisCategory; 5] = [
        AnalysisCategory::MainSellingPoints,
        AnalysisCategory::IdealVisitorSegments,
        AnalysisCategory::MonetizationIdeas,
        AnalysisCategory::PromotionalImprovements,
        AnalysisCategory::LocalCollaboration,
    ];

    /// Exact JSON key the model must use (case-sensitive)
    pub fn key(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Indonesian, Self::MainSellingPoints) => "Poin Jual Utama",
            (Locale::Indonesian, Self::IdealVisitorSegments) => "Segmen Wisatawan Ideal",
            (Locale::Indonesian, Self::MonetizationIdeas) => "Ide Monetisasi & Produk Pariwisata",
            (Locale::Indonesian, Self::PromotionalImprovements) => "Saran Peningkatan Pesan Promosi",
            (Locale::Indonesian, Self::LocalCollaboration) => "Potensi Kolaborasi Lokal",
            (Locale::English, Self::MainSellingPoints) => "Main Selling Points",
            (Locale::English, Self::IdealVisitorSegments) => "Ideal Visitor Segments",
            (Locale::English, Self::MonetizationIdeas) => "Monetization & Tourism Product Ideas",
            (Locale::English, Self::PromotionalImprovements) => {
                "Promotional Message Improvement Suggestions"
            }
            (Locale::English, Self::LocalCollaboration) => "Local Collaboration Potential",
        }
    }
}

/// Item field names `(point, description)` the model is asked to use
pub fn item_field_names(locale: Locale) -> (&'static str, &'static str) {
    match locale {
        Locale::Indonesian => ("poin", "deskripsi"),
        Locale::English => ("point", "description"),
    }
}

/// One strategy or idea inside an analysis category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    /// Short label
    #[serde(alias = "poin")]
    pub point: String,

    /// Explanation
    #[serde(alias = "deskripsi")]
    pub description: String,
}

impl AnalysisItem {
    pub fn new(point: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            description: description.into(),
        }
    }
}

/// Structured five-category promotional analysis
///
/// Only constructible with all five categories present and every item
/// carrying a non-blank point and description.
///
/// On the wire it is a JSON object with exactly the five category keys of
/// its locale, each holding `{poin, deskripsi}` or `{point, description}`
/// items. Deserialization detects the locale from the keys and runs the
/// same validation as recovery from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    locale: Locale,
    main_selling_points: Vec<AnalysisItem>,
    ideal_visitor_segments: Vec<AnalysisItem>,
    monetization_ideas: Vec<AnalysisItem>,
    promotional_improvements: Vec<AnalysisItem>,
    local_collaboration: Vec<AnalysisItem>,
}

impl Serialize for AnalysisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AnalysisCategory::ALL.len()))?;
        for (category, items) in self.sections() {
            map.serialize_entry(
                category.key(self.locale),
                &LocalizedItems {
                    items,
                    locale: self.locale,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnalysisRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        // Locale follows the key naming; Indonesian when neither matches
        let locale = [Locale::Indonesian, Locale::English]
            .into_iter()
            .find(|locale| value.get(AnalysisCategory::MainSellingPoints.key(*locale)).is_some())
            .unwrap_or_default();

        record_from_value(&value, locale).map_err(D::Error::custom)
    }
}

/// Items of one category, written with the locale's field names
struct LocalizedItems<'a> {
    items: &'a [AnalysisItem],
    locale: Locale,
}

impl Serialize for LocalizedItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (point_field, description_field) = item_field_names(self.locale);
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in self.items {
            seq.serialize_element(&LocalizedItem {
                fields: (point_field, description_field),
                item,
            })?;
        }
        seq.end()
    }
}

struct LocalizedItem<'a> {
    fields: (&'static str, &'static str),
    item: &'a AnalysisItem,
}

impl Serialize for LocalizedItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.fields.0, &self.item.point)?;
        map.serialize_entry(self.fields.1, &self.item.description)?;
        map.end()
    }
}

impl AnalysisRecord {
    /// Build a record from item lists given in [`AnalysisCategory::ALL`] order
    pub fn from_sections(
        locale: Locale,
        sections: [Vec<AnalysisItem>; 5],
    ) -> Result<Self, RecoveryError> {
        let (point_field, description_field) = item_field_names(locale);

        for (category, items) in AnalysisCategory::ALL.iter().zip(sections.iter()) {
            for (index, item) in items.iter().enumerate() {
                let blank = if item.point.trim().is_empty() {
                    Some(point_field)
                } else if item.description.trim().is_empty() {
                    Some(description_field)
                } else {
                    None
                };

                if let Some(field) = blank {
                    return Err(RecoveryError::InvalidItem {
                        key: category.key(locale).to_string(),
                        index,
                        reason: format!("\"{}\" is empty", field),
                    });
                }
            }
        }

        let [main_selling_points, ideal_visitor_segments, monetization_ideas, promotional_improvements, local_collaboration] =
            sections;

        Ok(Self {
            locale,
            main_selling_points,
            ideal_visitor_segments,
            monetization_ideas,
            promotional_improvements,
            local_collaboration,
        })
    }

    /// Locale whose keys the record was recovered under
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Items of one category, in the order the model gave them
    pub fn items(&self, category: AnalysisCategory) -> &[AnalysisItem] {
        match category {
            AnalysisCategory::MainSellingPoints => &self.main_selling_points,
            AnalysisCategory::IdealVisitorSegments => &self.ideal_visitor_segments,
            AnalysisCategory::MonetizationIdeas => &self.monetization_ideas,
            AnalysisCategory::PromotionalImprovements => &self.promotional_improvements,
            AnalysisCategory::LocalCollaboration => &self.local_collaboration,
        }
    }

    /// Categories with their items, in fixed order
    pub fn sections(&self) -> impl Iterator<Item = (AnalysisCategory, &[AnalysisItem])> + '_ {
        AnalysisCategory::ALL
            .into_iter()
            .map(move |category| (category, self.items(category)))
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.sections().map(|(_, items)| items.len()).sum()
    }
}
