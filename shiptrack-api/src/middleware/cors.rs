use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    Any,
    List(Vec<String>),
}

impl OriginPolicy {
    /// Parses a comma separated allow-list. A `*` entry anywhere allows all.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }

    /// Requests without an `Origin` header (same-origin, curl, servers) pass.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match (self, origin) {
            (_, None) | (Self::Any, _) => true,
            (Self::List(origins), Some(origin)) => origins.iter().any(|allowed| allowed == origin),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let allow_origin = match self {
            Self::Any => AllowOrigin::any(),
            Self::List(origins) => {
                AllowOrigin::list(origins.iter().filter_map(|origin| origin.parse().ok()))
            }
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

/// Rejects disallowed origins before routing and answers every preflight
/// with 204.
pub async fn origin_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default());

    if !state.origins.allows(origin) {
        warn!("CORS blocked origin: {:?}", origin);
        return AppError::CorsRejection.into_response();
    }

    if req.method() == Method::OPTIONS {
        return no_content(next.run(req).await);
    }

    next.run(req).await
}

// Keeps the CORS headers added by the inner layer, drops everything else.
fn no_content(response: Response) -> Response {
    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    for name in [header::CONTENT_TYPE, header::CONTENT_LENGTH, header::ALLOW] {
        parts.headers.remove(name);
    }
    Response::from_parts(parts, Body::empty())
}
