use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
        }
    }

    /// Create a data store unavailable error response
    pub fn data_store_unavailable() -> Self {
        Self {
            error: "data_store_unavailable".to_string(),
            message: "The data store is currently unavailable".to_string(),
        }
    }

    /// Create a query execution error response
    pub fn query_execution_error() -> Self {
        Self {
            error: "query_execution_error".to_string(),
            message: "The profile could not be retrieved".to_string(),
        }
    }

    /// HTTP status matching the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            "data_store_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
