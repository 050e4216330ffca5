use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shiptrack_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    AuthorizationError(String),
    /// A provider call failed. `message` is all the client sees.
    UpstreamError {
        message: &'static str,
        source: CoreError,
    },
    CorsRejection,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::UpstreamError { message, source } => {
                tracing::error!("{}: {}", message, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": message }),
                )
            }
            AppError::CorsRejection => (
                StatusCode::FORBIDDEN,
                json!({ "error": "Not allowed by CORS" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("Missing ref parameter".into()), StatusCode::BAD_REQUEST),
            (AppError::AuthorizationError("Invalid public key".into()), StatusCode::FORBIDDEN),
            (
                AppError::UpstreamError {
                    message: "Failed to notify",
                    source: CoreError::UpstreamStatus(502),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::CorsRejection, StatusCode::FORBIDDEN),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
