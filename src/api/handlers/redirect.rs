//! Handler for alias redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL, unchanged.
///
/// # Errors
///
/// Answers `200 OK` with the error envelope when the alias is empty
/// (`invalid request`), unknown (`not found`) or storage fails
/// (`internal error`). No redirect is issued in those cases.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.url_service.resolve(&alias).await?;

    let location = HeaderValue::try_from(url).map_err(|e| {
        tracing::error!(alias, error = %e, "stored url is not a valid header value");
        AppError::internal("internal error", json!({ "alias": alias }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
