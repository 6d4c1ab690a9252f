//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::api::dto::response::ApiResponse;
use crate::state::AppState;

/// Reports whether the service can reach its storage.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: storage answers queries
/// - **503 Service Unavailable**: storage ping failed
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");

    if state.url_service.is_healthy().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                response: ApiResponse::ok(),
                version,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                response: ApiResponse::error("storage unavailable"),
                version,
            }),
        )
    }
}
