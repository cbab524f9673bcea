use std::sync::Arc;
use axum::{
    http::Method,
    routing::get,
    Extension,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::debug;

use longevity_tracker_data::database::DatabasePool;
use longevity_tracker_domain::health::create_health_service;
use longevity_tracker_domain::services::create_profile_service;

use crate::api::handlers::{health, profile};
use crate::config::{AppConfig, ServerConfig};
use crate::openapi::configure_swagger_routes;

/// Build the application router around already-constructed services
pub fn create_app(
    profile_service: profile::ProfileService,
    health_service: health::HealthService,
    server: &ServerConfig,
) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/users/:user_id/profile", get(profile::get_user_profile))
        .with_state(profile_service);

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service))
        .layer(Extension(health::Environment(server.environment.clone())));

    debug!("Public routes configured");

    // The UI is served from a different origin and only reads
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .merge(configure_swagger_routes())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the application router backed by the MySQL pool described in `config`
pub fn create_application(config: &AppConfig) -> Router {
    let pool = DatabasePool::connect(&config.database);

    let profile_service: profile::ProfileService = Arc::new(create_profile_service(pool.clone()));
    let health_service: health::HealthService = Arc::new(create_health_service(pool));

    health::initialize_server_start_time();

    create_app(profile_service, health_service, &config.server)
}
