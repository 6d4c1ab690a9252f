//! Handler for the save endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL under a client-chosen or generated alias.
///
/// # Endpoint
///
/// `POST /url` (basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "alias": "ex1" }
/// ```
///
/// `alias` is optional; when omitted or empty a random one is generated.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "ex1" }
/// ```
///
/// # Errors
///
/// All failures answer `200 OK` with `{"status": "Error", "error": ...}`:
///
/// - `field URL is a required field` / `field URL is not a valid URL`
/// - `failed to decode request` for a body that is not valid JSON
/// - `url already exists` if the alias is taken
/// - `failed to add url` on storage failures
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(payload) = payload?;

    payload.validate()?;

    let url = payload.url.unwrap_or_default();

    let alias = state.url_service.shorten(url, payload.alias).await?;

    Ok(Json(SaveResponse::new(alias)))
}
