use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shiptrack_core::{lookup_shipment, ShipmentView};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ShipmentQuery {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub key: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/getShipment", get(get_shipment))
}

/// GET /api/getShipment?ref=..&key=..
/// Orders matching the reference plus their related log entries
async fn get_shipment(
    State(state): State<AppState>,
    query: Result<Query<ShipmentQuery>, QueryRejection>,
) -> Result<Json<ShipmentView>, AppError> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let reference = query
        .reference
        .filter(|reference| !reference.is_empty())
        .ok_or_else(|| AppError::ValidationError("Missing ref parameter".to_string()))?;

    state
        .access
        .public_key
        .check(query.key.as_deref(), "Invalid public key")?;

    let snapshot = state
        .shipments
        .fetch_snapshot(&reference)
        .await
        .map_err(|source| AppError::UpstreamError {
            message: "Failed to fetch shipment data",
            source,
        })?;

    Ok(Json(lookup_shipment(&reference, snapshot)))
}
