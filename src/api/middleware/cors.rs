//! CORS policy for browser clients.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS: any origin may call the API.
///
/// Preflight `OPTIONS` requests are answered by this layer directly, so it
/// must sit outside the auth gate.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
