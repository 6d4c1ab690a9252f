//! Handler for alias removal.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::response::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes the mapping stored under an alias.
///
/// # Endpoint
///
/// `DELETE /url/{alias}` (basic auth)
///
/// # Response
///
/// ```json
/// { "status": "OK" }
/// ```
///
/// # Errors
///
/// Answers `200 OK` with the error envelope for an empty alias
/// (`invalid request`), an unknown alias (`url not found`) or a storage
/// failure (`failed to delete url`).
pub async fn delete_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse>, AppError> {
    state.url_service.remove(&alias).await?;

    Ok(Json(ApiResponse::ok()))
}
