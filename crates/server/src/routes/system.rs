use actix_web::{get, web, HttpResponse};
use nusantara_story::StyleTag;
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;
use crate::types::{HealthResponse, StyleOption};

/// Liveness plus provider reachability
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let reachable = state.generator.provider_reachable().await;
    debug!("Health check - Provider reachable: {}", reachable);

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        provider: state.generator.provider(),
        reachable,
    })
}

/// Narrative styles with labels in the configured locale
#[get("/styles")]
pub async fn styles(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let locale = state.generator.locale();
    let options: Vec<StyleOption> = StyleTag::ALL
        .iter()
        .map(|style| StyleOption {
            value: style.as_str(),
            label: style.label(locale),
        })
        .collect();

    HttpResponse::Ok().json(options)
}
