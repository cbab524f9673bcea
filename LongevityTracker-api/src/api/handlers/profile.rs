use std::sync::Arc;
use axum::{
    extract::{rejection::PathRejection, Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};

use longevity_tracker_domain::services::{ProfileServiceError, ProfileServiceTrait};

use crate::entities::common::ErrorResponse;
use crate::entities::profile::ProfileResponse;

/// Service type for dependency injection
pub type ProfileService = Arc<dyn ProfileServiceTrait + Send + Sync>;

/// Get a user's profile and latest biomarker measurements
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/profile",
    params(
        ("userId" = i64, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Profile retrieved; user is null when the user does not exist", body = ProfileResponse),
        (status = 400, description = "userId is not an integer", body = ErrorResponse),
        (status = 500, description = "A query failed", body = ErrorResponse),
        (status = 503, description = "The data store is unavailable", body = ErrorResponse),
    ),
    tag = "profile"
)]
#[instrument(skip(service, user_id))]
pub async fn get_user_profile(
    State(service): State<ProfileService>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, Response> {
    let Path(user_id) = user_id.map_err(|rejection| {
        warn!("Rejected profile request: {}", rejection);
        ErrorResponse::bad_request("userId must be an integer").into_response()
    })?;

    info!("Fetching profile for user {}", user_id);

    match service.get_user_profile(user_id).await {
        Ok(bundle) => {
            let response = ProfileResponse::from(bundle);
            info!(
                "Profile for user {} has user={} and {} biomarkers",
                user_id,
                response.user.is_some(),
                response.biomarkers.len()
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(ProfileServiceError::DataStoreUnavailable(e)) => {
            error!("Data store unavailable while fetching profile for user {}: {}", user_id, e);
            Err(ErrorResponse::data_store_unavailable().into_response())
        }
        Err(ProfileServiceError::QueryExecutionError(e)) => {
            error!("Query failed while fetching profile for user {}: {}", user_id, e);
            Err(ErrorResponse::query_execution_error().into_response())
        }
    }
}
