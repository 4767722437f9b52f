use actix_web::{post, web, HttpResponse};
use nusantara_common::NusantaraError;
use nusantara_pdf::{render_analysis_pdf, render_narrative_pdf};

use crate::error::ApiError;
use crate::types::{ExportAnalysisRequest, ExportNarrativeRequest};

fn pdf_response(filename: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

#[post("/export/narrative")]
pub async fn export_narrative(
    req: web::Json<ExportNarrativeRequest>,
) -> Result<HttpResponse, ApiError> {
    let ExportNarrativeRequest { title, narrative } = req.into_inner();

    let bytes = web::block(move || render_narrative_pdf(&title, &narrative))
        .await
        .map_err(|e| NusantaraError::internal(format!("PDF rendering task failed: {}", e)))??;

    Ok(pdf_response("narrative.pdf", bytes))
}

#[post("/export/analysis")]
pub async fn export_analysis(
    req: web::Json<ExportAnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    let record = req.into_inner().analysis;

    let bytes = web::block(move || render_analysis_pdf(&record))
        .await
        .map_err(|e| NusantaraError::internal(format!("PDF rendering task failed: {}", e)))??;

    Ok(pdf_response("analysis.pdf", bytes))
}
