#[cfg(test)]
mod profile_tests {
    use axum::{
        body::to_bytes,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::sync::Arc;

    use longevity_tracker_data::models::profile::{CalendarValue, LatestMeasurementRow};
    use longevity_tracker_domain::testing::{create_mock_profile_service, MockFailure, MockProfileRepository};

    use crate::api::handlers::profile::{get_user_profile, ProfileService};

    async fn call(repository: MockProfileRepository, user_id: i64) -> (StatusCode, Value) {
        let service: ProfileService = Arc::new(create_mock_profile_service(repository));
        let response: Response = match get_user_profile(State(service), Ok(Path(user_id))).await {
            Ok(ok) => ok.into_response(),
            Err(err) => err,
        };

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_empty_profile() {
        let (status, body) = call(MockProfileRepository::new(), 404).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["user"].is_null());
        assert_eq!(body["biomarkers"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_biomarker_fields_are_camel_case() {
        let repository = MockProfileRepository::new().with_measurement(
            9,
            LatestMeasurementRow {
                biomarker_id: 12,
                name: "Albumin".to_string(),
                value: Some(4.25),
                units: Some("g/dL".to_string()),
                taken_at: Some(CalendarValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())),
            },
        );

        let (status, body) = call(repository, 9).await;

        assert_eq!(status, StatusCode::OK);
        let biomarker = &body["biomarkers"][0];
        assert_eq!(biomarker["biomarkerId"], 12);
        assert_eq!(biomarker["takenAt"], "2024-01-05");
        assert_eq!(biomarker["value"], 4.25);
    }

    #[tokio::test]
    async fn test_unavailable_data_store_returns_503() {
        let repository = MockProfileRepository::new().with_failure(MockFailure::Connection);

        let (status, body) = call(repository, 1).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "data_store_unavailable");
        assert!(body.get("biomarkers").is_none());
    }

    #[tokio::test]
    async fn test_query_failure_returns_500() {
        let repository = MockProfileRepository::new().with_failure(MockFailure::Query);

        let (status, body) = call(repository, 1).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "query_execution_error");
        // Server error text stays in the logs
        assert!(!body["message"].as_str().unwrap().contains("doesn't exist"));
    }
}
