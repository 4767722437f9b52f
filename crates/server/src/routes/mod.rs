use actix_web::{error::InternalError, web, HttpResponse};

use crate::types::ErrorResponse;

pub mod export;
pub mod generation;
pub mod system;

/// Register every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(system::health)
        .service(system::styles)
        .service(
            web::scope("/api")
                .service(generation::narrative)
                .service(generation::analysis)
                .service(generation::story)
                .service(export::export_narrative)
                .service(export::export_analysis),
        );
}

/// Malformed or incomplete JSON bodies answer 400 with the usual error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid request body".to_string(),
            details: Some(err.to_string()),
        });
        InternalError::from_response(err, response).into()
    })
}
