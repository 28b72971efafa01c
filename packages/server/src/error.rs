//! HTTP error envelope.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sponsorfacts::AggregateError;
use thiserror::Error;

/// Errors surfaced to API clients.
///
/// Internal detail never reaches the response body: validation errors
/// carry a fixed message, everything else collapses to "Server error".
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent an invalid request
    #[error("{0}")]
    BadRequest(String),

    /// Anything unexpected escaping the pipeline
    #[error("internal error")]
    Internal,
}

impl From<AggregateError> for ApiError {
    fn from(error: AggregateError) -> Self {
        match error {
            AggregateError::MissingSponsor => Self::BadRequest("Missing sponsor".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sponsor_maps_to_bad_request() {
        let api: ApiError = AggregateError::MissingSponsor.into();
        assert!(matches!(api, ApiError::BadRequest(ref m) if m == "Missing sponsor"));
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::BadRequest("Missing sponsor".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
