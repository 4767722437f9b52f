//! Prompt templates for narrative and analysis generation

use nusantara_common::Locale;
use nusantara_llm::GenerateOptions;

use crate::error::GenerationError;
use crate::model::{item_field_names, AnalysisCategory, NarrativeResult, ObjectDescription};

/// Sampling for the storytelling call
pub const NARRATIVE_OPTIONS: GenerateOptions = GenerateOptions {
    max_output_tokens: Some(4000),
    temperature: Some(0.6),
    top_p: Some(0.9),
    top_k: Some(50),
};

/// Sampling for the structured analysis call
pub const ANALYSIS_OPTIONS: GenerateOptions = GenerateOptions {
    max_output_tokens: Some(4000),
    temperature: Some(0.4),
    top_p: None,
    top_k: None,
};

/// Directive label preceding the target audience line
pub fn audience_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Indonesian => "Target Audiens Utama:",
        Locale::English => "Target Audience:",
    }
}

/// Directive label preceding the style line
pub fn style_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Indonesian => "Gaya Bahasa yang Diinginkan:",
        Locale::English => "Desired Writing Style:",
    }
}

/// Prompt asking for a 300-600 word narrative about the object
///
/// Audience and style lines are emitted only when the user supplied them.
pub fn narrative_prompt(
    description: &ObjectDescription,
    locale: Locale,
) -> Result<String, GenerationError> {
    description.validate()?;

    let title = description.title.trim();
    let location = description.location.trim();
    let key_facts = description.key_facts.trim();

    let mut prompt = match locale {
        Locale::Indonesian => format!(
            "Anda adalah seorang pencerita ulung dan promotor pariwisata yang sangat mengenal kekayaan budaya dan pariwisata di {location}, Indonesia.\n\
             Buatlah narasi atau skrip promosi yang sangat menarik dan detail (beberapa paragraf, sekitar 300-600 kata) berdasarkan informasi berikut:\n\
             \n\
             Nama Objek Budaya/Pariwisata: {title}\n\
             Lokasi: {location}\n\
             Poin-Poin Kunci / Fakta Sejarah / Detail Penting: {key_facts}\n"
        ),
        Locale::English => format!(
            "You are a master storyteller and tourism promoter who knows the culture and attractions of {location}, Indonesia intimately.\n\
             Write a captivating, detailed narrative or promotional script (several paragraphs, roughly 300-600 words) based on the following information:\n\
             \n\
             Cultural/Tourism Object: {title}\n\
             Location: {location}\n\
             Key Points / Historical Facts / Important Details: {key_facts}\n"
        ),
    };

    if let Some(audience) = description.audience() {
        prompt.push_str(&format!("{} {}\n", audience_label(locale), audience));
    }

    if description.style.is_specified() {
        prompt.push_str(&format!(
            "{} {} ({})\n",
            style_label(locale),
            description.style.label(locale),
            description.style.guidance(locale)
        ));
    }

    prompt.push_str(match locale {
        Locale::Indonesian => {
            "\nKembangkan poin-poin ini menjadi narasi yang koheren dan deskriptif dalam paragraf-paragraf yang mengalir. \
             Tambahkan sentuhan emosional dan gambarkan pengalaman yang dapat dilihat, didengar, dicium, dan dirasakan pengunjung. \
             Pastikan narasi terasa lengkap."
        }
        Locale::English => {
            "\nDevelop these points into a coherent, descriptive narrative of flowing paragraphs. \
             Add emotional touches and describe what visitors can see, hear, smell and feel. \
             Make sure the narrative feels complete."
        }
    });

    Ok(prompt)
}

/// Prompt asking for the five-category analysis as fenced JSON
pub fn analysis_prompt(location: &str, narrative: &NarrativeResult, locale: Locale) -> String {
    let location = location.trim();
    let (point, description) = item_field_names(locale);
    let keys = AnalysisCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| format!("{}. \"{}\"", i + 1, category.key(locale)))
        .collect::<Vec<_>>()
        .join("\n");
    let selling = AnalysisCategory::MainSellingPoints.key(locale);
    let segments = AnalysisCategory::IdealVisitorSegments.key(locale);

    match locale {
        Locale::Indonesian => format!(
            r#"Anda adalah seorang konsultan pemasaran pariwisata dan pengembang ekonomi lokal untuk wilayah {location}.
Analisis narasi budaya/pariwisata berikut secara mendalam untuk mengekstrak wawasan kunci dan menyarankan optimasi yang konkret dan terperinci untuk dampak ekonomi dan promosi pariwisata.

Berikan respons Anda dalam format JSON. Objek JSON harus memiliki 5 kunci utama berikut, ditulis persis seperti di bawah ini:
{keys}

Nilai setiap kunci berupa ARRAY OBJEK. Setiap objek dalam array memiliki dua properti: "{point}" (nama singkat dari strategi/ide) dan "{description}" (penjelasan singkat namun padat tentang strategi tersebut).

Contoh struktur:
{{
  "{selling}": [
    {{ "{point}": "Pemandangan Kawah Ijen", "{description}": "Keunikan kawah dengan api biru dan danau asam belerang, menarik wisatawan petualangan dan fotografi." }}
  ],
  "{segments}": [
    {{ "{point}": "Wisatawan Minat Khusus (Kopi)", "{description}": "Mereka mencari pengalaman otentik dan edukatif tentang proses dan cita rasa kopi lokal." }}
  ]
}}

Pastikan setiap "{description}" cukup informatif sehingga pengguna memahami strategi atau potensi di baliknya, tidak hanya daftar poin.
Sangat penting: Berikan HANYA objek JSON yang valid. Bungkus seluruh objek JSON Anda di dalam blok kode Markdown seperti ini:
```json
{{
  "key": "value"
}}
```
Jangan tambahkan teks lain di luar blok kode JSON tersebut.

Narasi yang Dihasilkan:
---
{narrative}
---"#,
            narrative = narrative.text()
        ),
        Locale::English => format!(
            r#"You are a tourism marketing consultant and local economic developer for the {location} region.
Analyse the following cultural/tourism narrative in depth to extract key insights and suggest concrete, detailed optimisations for economic impact and tourism promotion.

Answer in JSON. The JSON object must have exactly these 5 top-level keys, spelled exactly as written:
{keys}

Each key's value is an ARRAY OF OBJECTS. Every object in the array has two properties: "{point}" (a short name for the strategy/idea) and "{description}" (a brief but substantive explanation of it).

Example structure:
{{
  "{selling}": [
    {{ "{point}": "Ijen Crater Views", "{description}": "A crater with blue fire and a sulphuric acid lake, drawing adventure travellers and photographers." }}
  ],
  "{segments}": [
    {{ "{point}": "Special-Interest Travellers (Coffee)", "{description}": "They look for authentic, educational experiences of local coffee processing and flavour." }}
  ]
}}

Make every "{description}" informative enough that the reader understands the strategy or potential behind it, not just a list of points.
Very important: return ONLY a valid JSON object. Wrap the entire JSON object in a Markdown code block like this:
```json
{{
  "key": "value"
}}
```
Do not add any other text outside that JSON code block.

Generated Narrative:
---
{narrative}
---"#,
            narrative = narrative.text()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleTag;

    fn kopi_gayo() -> ObjectDescription {
        ObjectDescription::new("Kopi Gayo", "Aceh Tengah", "Arabika, proses giling basah")
    }

    #[test]
    fn test_kopi_gayo_scenario() {
        for locale in [Locale::Indonesian, Locale::English] {
            let prompt = narrative_prompt(&kopi_gayo(), locale).unwrap();
            assert!(prompt.contains("Kopi Gayo"));
            assert!(prompt.contains("Aceh Tengah"));
            assert!(prompt.contains("Arabika, proses giling basah"));
            assert!(!prompt.contains(audience_label(locale)));
            assert!(!prompt.contains(style_label(locale)));
        }
    }

    #[test]
    fn test_optional_directives_appear_once_each() {
        let description = kopi_gayo()
            .with_audience("Pecinta kopi spesialti")
            .with_style(StyleTag::Poetic);

        for locale in [Locale::Indonesian, Locale::English] {
            let prompt = narrative_prompt(&description, locale).unwrap();
            let audience_lines: Vec<&str> = prompt
                .lines()
                .filter(|line| line.starts_with(audience_label(locale)))
                .collect();
            let style_lines: Vec<&str> = prompt
                .lines()
                .filter(|line| line.starts_with(style_label(locale)))
                .collect();

            assert_eq!(audience_lines, vec![format!("{} Pecinta kopi spesialti", audience_label(locale))]);
            assert_eq!(style_lines.len(), 1);
            assert!(style_lines[0].contains(StyleTag::Poetic.label(locale)));
        }
    }

    #[test]
    fn test_blank_audience_omits_directive() {
        let description = kopi_gayo().with_audience("  ").with_style(StyleTag::Folklore);
        let prompt = narrative_prompt(&description, Locale::Indonesian).unwrap();
        assert!(!prompt.contains(audience_label(Locale::Indonesian)));
        assert!(prompt.contains("Gaya Bahasa yang Diinginkan: Cerita Rakyat"));
    }

    #[test]
    fn test_narrative_prompt_fails_on_empty_required_field() {
        let description = ObjectDescription::new("", "Bondowoso", "Kawah Ijen");
        assert!(matches!(
            narrative_prompt(&description, Locale::Indonesian),
            Err(GenerationError::Validation(_))
        ));
    }

    #[test]
    fn test_analysis_prompt_embeds_narrative_keys_and_fence() {
        let narrative = NarrativeResult::new("Di Dataran Tinggi Gayo, kabut pagi turun perlahan.").unwrap();

        for locale in [Locale::Indonesian, Locale::English] {
            let prompt = analysis_prompt("Aceh Tengah", &narrative, locale);
            assert!(prompt.contains("Aceh Tengah"));
            assert!(prompt.contains(narrative.text()));
            assert!(prompt.contains("```json"));
            for category in AnalysisCategory::ALL {
                assert!(prompt.contains(&format!("\"{}\"", category.key(locale))));
            }
            let (point, description) = item_field_names(locale);
            assert!(prompt.contains(&format!("\"{}\"", point)));
            assert!(prompt.contains(&format!("\"{}\"", description)));
        }
    }
}
