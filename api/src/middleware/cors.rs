//! CORS middleware configuration for browser clients.
//!
//! Origins come from [`CorsConfig`]. An empty list (or `*`) is permissive,
//! which is what development setups use; deployments list their front-end
//! origins explicitly.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ss_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        tracing::info!("Configuring permissive CORS");
        Cors::default().allow_any_origin()
    } else {
        tracing::info!(origins = ?config.allowed_origins, "Configuring restricted CORS");
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age)
}
