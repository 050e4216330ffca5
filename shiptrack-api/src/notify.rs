use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{error::AppError, middleware::PublicKey, state::AppState};

const KEY_REJECTED: &str = "Invalid or missing public key";

#[derive(Debug, Default, Deserialize)]
pub struct NotifyQuery {
    pub key: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/notify", post(notify))
}

/// POST /api/notify
/// Relays an arbitrary JSON payload to the sheet provider and returns its reply
async fn notify(
    State(state): State<AppState>,
    query: Result<Query<NotifyQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload = if state.access.notify_require_key {
        let query = query.map(|Query(query)| query).unwrap_or_default();
        gated_payload(&state.access.public_key, query.key.as_deref(), &body)?
    } else {
        parse_payload(&body)?
    };
    debug!("Incoming payload: {}", payload);

    let reply = state
        .shipments
        .relay_notification(&payload)
        .await
        .map_err(|source| AppError::UpstreamError {
            message: "Failed to notify",
            source,
        })?;

    Ok(Json(reply))
}

// An empty body counts as an empty object.
fn parse_payload(body: &[u8]) -> Result<Value, AppError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|_| AppError::ValidationError("Invalid JSON body".to_string()))
}

// A query key wins over a body key. Without one the body is only read for
// its `key` member, and an unreadable body is treated as carrying no key.
fn gated_payload(
    public_key: &PublicKey,
    query_key: Option<&str>,
    body: &[u8],
) -> Result<Value, AppError> {
    if query_key.is_some() {
        public_key.check(query_key, KEY_REJECTED)?;
        return parse_payload(body);
    }

    let payload = parse_payload(body)
        .map_err(|_| AppError::AuthorizationError(KEY_REJECTED.to_string()))?;
    public_key.check(payload.get("key").and_then(Value::as_str), KEY_REJECTED)?;
    Ok(payload)
}
