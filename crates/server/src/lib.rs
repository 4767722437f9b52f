//! Nusantara HTTP Server
//!
//! Actix-web REST API over the story generator and PDF export

mod error;
pub mod routes;
mod state;
pub mod types;

pub use error::ApiError;
pub use routes::configure;
pub use state::AppState;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use nusantara_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Build the application state from configuration and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting HTTP server on http://{} - Provider: {}, Locale: {}",
        bind_addr,
        state.generator.provider(),
        state.generator.locale()
    );

    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
