//! Nusantara PDF export
//!
//! Renders a narrative or an analysis record into a standalone PDF.

pub mod layout;
mod render;

use chrono::Datelike;
use nusantara_common::{NusantaraError, Result};
use nusantara_story::AnalysisRecord;
use tracing::info;

use crate::layout::Block;
use crate::render::{analysis_title, render_blocks};

const TITLE_PT: f32 = 22.0;
const HEADING_PT: f32 = 16.0;
const POINT_PT: f32 = 13.0;
const BODY_PT: f32 = 11.0;
const FOOTER_PT: f32 = 9.0;

/// Render a narrative under its title
pub fn render_narrative_pdf(title: &str, narrative_text: &str) -> Result<Vec<u8>> {
    if narrative_text.trim().is_empty() {
        return Err(NusantaraError::invalid_input("Narrative text is empty"));
    }

    let mut blocks = vec![Block::new(title.trim(), TITLE_PT)];
    let mut space = 8.0;
    for paragraph in narrative_text.lines() {
        if paragraph.trim().is_empty() {
            space = 4.0;
            continue;
        }
        blocks.push(Block::new(paragraph.trim(), BODY_PT + 1.0).space_before(space));
        space = 1.5;
    }

    let bytes = render_blocks(title, &blocks)?;
    info!("Narrative PDF rendered - Title: {}, Size: {} bytes", title, bytes.len());
    Ok(bytes)
}

/// Render an analysis record, one section per category in fixed order
pub fn render_analysis_pdf(record: &AnalysisRecord) -> Result<Vec<u8>> {
    let locale = record.locale();
    let title = analysis_title(locale);

    let mut blocks = vec![Block::new(title, TITLE_PT)];

    for (category, items) in record.sections() {
        blocks.push(Block::new(category.key(locale), HEADING_PT).space_before(10.0));
        for item in items {
            blocks.push(Block::new(format!("- {}", item.point), POINT_PT).space_before(4.0));
            blocks.push(Block::new(item.description.as_str(), BODY_PT).indent(7.0).space_before(1.0));
        }
    }

    let year = chrono::Local::now().year();
    blocks.push(Block::new(format!("Nusantara Story AI - {}", year), FOOTER_PT).space_before(16.0));

    let bytes = render_blocks(title, &blocks)?;
    info!(
        "Analysis PDF rendered - Items: {}, Size: {} bytes",
        record.item_count(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_common::Locale;
    use nusantara_story::AnalysisItem;

    fn record(locale: Locale) -> AnalysisRecord {
        let item = |p: &str, d: &str| vec![AnalysisItem::new(p, d)];
        AnalysisRecord::from_sections(
            locale,
            [
                item("Matahari Terbit", "Lautan awan dan siluet Semeru."),
                item("Fotografer", "Mengejar cahaya pagi."),
                item("Sewa Jip", "Dikelola warga Tengger."),
                item("Cerita Kasada", "Angkat ritual sebagai daya tarik."),
                item("Homestay", "Kerja sama dengan keluarga desa."),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_narrative_pdf_is_pdf() {
        let bytes = render_narrative_pdf(
            "Gunung Bromo",
            "Tersembunyi di jantung Taman Nasional Bromo Tengger Semeru.\n\nBukan hanya pesona visual.",
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_narrative_pdf_rejects_blank_text() {
        assert!(render_narrative_pdf("Gunung Bromo", "  \n ").is_err());
    }

    #[test]
    fn test_analysis_pdf_is_pdf() {
        for locale in [Locale::Indonesian, Locale::English] {
            let bytes = render_analysis_pdf(&record(locale)).unwrap();
            assert!(bytes.starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_long_narrative_spans_pages() {
        let text = "Kopi Gayo adalah warisan berharga dataran tinggi Aceh. ".repeat(400);
        let bytes = render_narrative_pdf("Kopi Gayo", &text).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
