use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Profile endpoints
        crate::api::handlers::profile::get_user_profile,
    ),
    components(
        schemas(
            // Entities
            crate::entities::profile::ProfileResponse,
            crate::entities::profile::PublicUserProfile,
            crate::entities::profile::PublicBiomarkerMeasurement,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "profile", description = "User profile and latest biomarker readings")
    ),
    info(
        title = "Longevity Tracker API",
        version = "0.1.0",
        description = "Read-only API serving user profiles and their latest biomarker measurements",
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
