//! Application state and factory
//!
//! This module holds the shared services handed to every handler and
//! builds the Actix-web application around them.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use ss_core::{
    NotifierTrait, ProfileRepository, RegistrationService, VerificationService,
    VerificationStore,
};
use ss_shared::{error_codes, CorsConfig, ErrorResponse, ServerConfig};

use crate::handlers::{json_error_handler, path_error_handler};
use crate::middleware::create_cors;
use crate::routes::{email, health, profiles};

/// Application state that holds shared services
pub struct AppState<P, S, N>
where
    P: ProfileRepository,
    S: VerificationStore,
    N: NotifierTrait + 'static,
{
    pub verification_service: Arc<VerificationService<S, N>>,
    pub registration_service: Arc<RegistrationService<P, S, N>>,
}

impl<P, S, N> AppState<P, S, N>
where
    P: ProfileRepository,
    S: VerificationStore,
    N: NotifierTrait + 'static,
{
    pub fn new(
        verification_service: Arc<VerificationService<S, N>>,
        registration_service: Arc<RegistrationService<P, S, N>>,
    ) -> Self {
        Self {
            verification_service,
            registration_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<P, S, N>(
    app_state: web::Data<AppState<P, S, N>>,
    server: &ServerConfig,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);
    let path_config = web::PathConfig::default().error_handler(path_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(path_config)
        // Request spans wrap everything, including CORS rejections
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .configure(configure_routes::<P, S, N>)
        .default_service(web::route().to(not_found))
}

/// Register every route on a service config
pub fn configure_routes<P, S, N>(cfg: &mut web::ServiceConfig)
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/email")
                .route("/request-code", web::post().to(email::request_code::<P, S, N>))
                .route("/verify-code", web::post().to(email::verify_code::<P, S, N>)),
        )
        .route(
            "/{collection}",
            web::post().to(profiles::register_profile::<P, S, N>),
        )
        .route(
            "/{collection}/{id}",
            web::get().to(profiles::fetch_profile::<P, S, N>),
        );
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
