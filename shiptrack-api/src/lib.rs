use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod captcha;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod shipments;
pub mod state;

pub use state::AppState;

pub const HEALTH_MESSAGE: &str = "Shipment Tracker Backend is running!";

pub fn app(state: AppState) -> Router {
    let cors = state.origins.cors_layer();

    Router::new()
        .route("/", get(health))
        .merge(shipments::routes())
        .merge(notify::routes())
        .merge(captcha::routes())
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::origin_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}
