#[cfg(test)]
mod health_tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse, Extension};
    use serde_json::Value;
    use std::sync::Arc;

    use longevity_tracker_domain::health::ComponentStatus;
    use longevity_tracker_domain::testing::MockHealthService;

    use crate::api::handlers::health::{health_check, initialize_server_start_time, Environment, HealthService};

    async fn call(service: MockHealthService) -> (StatusCode, Value) {
        let service: HealthService = Arc::new(service);
        let response = health_check(Extension(service), Extension(Environment("test".to_string())))
            .await
            .into_response();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check_healthy() {
        initialize_server_start_time();

        let (status, body) = call(MockHealthService::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "test");
        assert_eq!(body["components"]["database"]["status"], "ok");
        assert!(body["components"]["database"].get("message").is_none());
        assert!(body["version"].is_string());
        assert!(body["uptime"].is_u64());
    }

    #[tokio::test]
    async fn test_health_check_degraded_database() {
        let (status, body) =
            call(MockHealthService::new().with_database_status(ComponentStatus::Degraded)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["database"]["status"], "degraded");
    }

    #[tokio::test]
    async fn test_health_check_database_down() {
        let (status, body) =
            call(MockHealthService::new().with_database_status(ComponentStatus::Unhealthy)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["components"]["database"]["status"], "error");
        assert_eq!(body["components"]["api"]["status"], "ok");
        assert!(body["components"]["database"]["message"].is_string());
    }
}
