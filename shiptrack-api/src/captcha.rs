use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CaptchaRequest {
    pub token: Option<String>,
}

/// Outcome of a verification relay. Unlike the other endpoints these bodies
/// carry `message`, and a rejection echoes the provider's reply.
#[derive(Debug)]
pub enum CaptchaReply {
    Verified,
    MissingToken,
    Rejected(Value),
    ServerError,
}

impl IntoResponse for CaptchaReply {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CaptchaReply::Verified => (
                StatusCode::OK,
                json!({ "success": true, "message": "Verification successful" }),
            ),
            CaptchaReply::MissingToken => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": "Missing token" }),
            ),
            CaptchaReply::Rejected(data) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": "Invalid reCAPTCHA", "data": data }),
            ),
            CaptchaReply::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": "Server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/verify-recaptcha", post(verify_recaptcha))
}

/// POST /api/verify-recaptcha
async fn verify_recaptcha(
    State(state): State<AppState>,
    body: Result<Json<CaptchaRequest>, JsonRejection>,
) -> CaptchaReply {
    let token = match body {
        Ok(Json(CaptchaRequest { token: Some(token) })) if !token.is_empty() => token,
        _ => return CaptchaReply::MissingToken,
    };

    match state.captcha.verify(&token).await {
        Ok(verification) if verification.success => CaptchaReply::Verified,
        Ok(verification) => {
            info!("reCAPTCHA rejected token: {}", verification.payload);
            CaptchaReply::Rejected(verification.payload)
        }
        Err(e) => {
            error!("reCAPTCHA verification failed: {}", e);
            CaptchaReply::ServerError
        }
    }
}
