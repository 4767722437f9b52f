use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use nusantara_story::NarrativeResult;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{
    AnalysisRequest, AnalysisResponse, NarrativeRequest, NarrativeResponse, StoryResponse,
};

#[post("/narrative")]
pub async fn narrative(
    req: web::Json<NarrativeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let description = req.into_inner().into_description();
    let result = state.generator.generate_narrative(&description).await?;

    Ok(HttpResponse::Ok().json(NarrativeResponse {
        narrative: result.into_text(),
    }))
}

#[post("/analysis")]
pub async fn analysis(
    req: web::Json<AnalysisRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let AnalysisRequest {
        location,
        narrative: text,
    } = req.into_inner();
    let result = NarrativeResult::new(text)?;
    let record = state.generator.generate_analysis(&location, &result).await?;

    Ok(HttpResponse::Ok().json(AnalysisResponse { analysis: record }))
}

/// Narrative then analysis; a failed analysis still returns the narrative
#[post("/story")]
pub async fn story(
    req: web::Json<NarrativeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let description = req.into_inner().into_description();
    info!("Story request {} - Title: {}", request_id, description.title.trim());

    let outcome = state.generator.generate_story(&description).await?;

    let (record, analysis_error) = match outcome.analysis {
        Ok(record) => (Some(record), None),
        Err(e) => {
            warn!("Story request {} - analysis unavailable: {}", request_id, e);
            (None, Some(e.to_string()))
        }
    };

    Ok(HttpResponse::Ok().json(StoryResponse {
        request_id,
        generated_at: Utc::now(),
        narrative: outcome.narrative.into_text(),
        analysis: record,
        analysis_error,
    }))
}
