use nusantara_common::{Locale, NusantaraError, Result};
use printpdf::{
    BuiltinFont, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem,
    TextMatrix, TextRenderingMode,
};
use tracing::{debug, warn};

use crate::layout::{paginate, Block, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Draw laid-out blocks into a PDF byte stream (built-in Helvetica)
pub(crate) fn render_blocks(document_title: &str, blocks: &[Block]) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(document_title);
    let layer_id = doc.add_layer(&Layer::new("Text"));

    let font_bytes = BuiltinFont::Helvetica.get_subset_font().bytes;
    let font = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
        .ok_or_else(|| NusantaraError::pdf("Failed to parse built-in Helvetica font"))?;
    let font_id = doc.add_font(&font);

    let pages = paginate(blocks);
    debug!("Rendering '{}' - {} page(s)", document_title, pages.len());

    for lines in pages {
        let mut ops = vec![Op::BeginLayer {
            layer_id: layer_id.clone(),
        }];

        for line in lines {
            ops.extend([
                Op::SetFontSize {
                    size: Pt(line.size_pt),
                    font: font_id.clone(),
                },
                Op::StartTextSection,
                Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Mm(line.x_mm).into(), Mm(line.y_mm).into()),
                },
                Op::SetTextRenderingMode {
                    mode: TextRenderingMode::Fill,
                },
                Op::WriteText {
                    items: vec![TextItem::Text(line.text)],
                    font: font_id.clone(),
                },
                Op::EndTextSection,
            ]);
        }

        ops.push(Op::EndLayer {
            layer_id: layer_id.clone(),
        });

        let mut page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), vec![]);
        page.ops = ops;
        doc.pages.push(page);
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!("PDF generation warnings for '{}': {:?}", document_title, warnings);
    }

    Ok(bytes)
}

/// Heading of the analysis document
pub(crate) fn analysis_title(locale: Locale) -> &'static str {
    match locale {
        Locale::Indonesian => "Analisis Promosi",
        Locale::English => "Promotional Analysis",
    }
}
