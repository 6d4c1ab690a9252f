//! DTOs for health check endpoint.

use serde::Serialize;

use crate::api::dto::response::ApiResponse;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub response: ApiResponse,
    pub version: &'static str,
}
