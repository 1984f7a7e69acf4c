use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ss_api::{create_app, telemetry, AppState};
use ss_core::{RegistrationService, VerificationService, VerificationServiceConfig};
use ss_infra::{ConfiguredNotifier, DatabasePool, MySqlProfileRepository, MySqlVerificationStore};
use ss_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting StudySphere API server"
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("failed to apply database migrations")?;
    }

    let store = Arc::new(MySqlVerificationStore::new(pool.get_pool().clone()));
    let profiles = Arc::new(MySqlProfileRepository::new(pool.get_pool().clone()));
    let notifier = Arc::new(
        ConfiguredNotifier::from_config(&config.email)
            .context("failed to configure the email notifier")?,
    );
    tracing::info!(provider = ?notifier.provider(), "Email notifier ready");

    let verification_service = Arc::new(VerificationService::new(
        store,
        notifier,
        VerificationServiceConfig::from(&config),
    ));
    let registration_service = Arc::new(RegistrationService::new(
        profiles,
        verification_service.clone(),
        config.registration.password_hash_cost,
    ));
    let app_state = web::Data::new(AppState::new(verification_service, registration_service));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let server_config = config.server.clone();
    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &server_config, &cors_config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive))
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
