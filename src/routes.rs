//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{alias}`      - Redirect to the stored URL (public)
//! - `GET    /health`       - Storage health check (public)
//! - `POST   /url`          - Save a URL (basic auth)
//! - `DELETE /url/{alias}`  - Delete an alias (basic auth)
//!
//! # Middleware
//!
//! Outermost first: request id, CORS, tracing, request timeout,
//! request id propagation, then basic auth on `/url` routes.
//! Trailing slashes are trimmed before routing: the routed application is
//! mounted as the fallback of an outer router behind the path normalizer.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, cors, tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound for handling a single request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let url_router = api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::layer,
    ));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .nest("/url", url_router)
        .with_state(state)
        .layer(tracing::propagate_request_id_layer())
        .layer(timeout_layer(request_timeout))
        .layer(tracing::layer())
        .layer(cors::layer())
        .layer(tracing::set_request_id_layer());

    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Answers `408 Request Timeout` once `request_timeout` has elapsed.
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(Duration::from_millis(50)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_passes() {
        let app = Router::new()
            .route("/fast", get(|| async { "done" }))
            .layer(timeout_layer(Duration::from_secs(1)));

        let response = app
            .oneshot(Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
