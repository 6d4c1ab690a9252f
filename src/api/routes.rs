//! API route configuration.
//!
//! Mutating routes require basic authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{delete_handler, save_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

/// Routes nested under `/url`, protected by basic authentication.
///
/// # Endpoints
///
/// - `POST   /`         - Save a URL under an alias
/// - `DELETE /{alias}`  - Delete an alias
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(save_handler))
        .route("/{alias}", delete(delete_handler))
}
