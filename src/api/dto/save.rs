//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::response::ApiResponse;

/// Request to store a new alias mapping.
///
/// `alias` may be omitted or empty, in which case one is generated.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// Destination URL; must be an absolute URL that can be sent back
    /// unchanged in a `Location` header.
    #[validate(
        required(message = "field URL is a required field"),
        url(message = "field URL is not a valid URL"),
        custom(
            function = "validate_header_safe",
            message = "field URL is not a valid URL"
        )
    )]
    pub url: Option<String>,

    #[serde(default)]
    pub alias: Option<String>,
}

impl SaveRequest {
    pub fn new(url: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            alias,
        }
    }
}

/// URL parsing drops tabs and newlines, so a URL can parse and still be
/// unusable as a header value. Control characters are rejected outright.
fn validate_header_safe(url: &str) -> Result<(), ValidationError> {
    if url.bytes().any(|b| b.is_ascii_control()) {
        return Err(ValidationError::new("header_safe"));
    }
    Ok(())
}

/// Response for a successful save; carries the alias actually stored.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub response: ApiResponse,
    pub alias: String,
}

impl SaveResponse {
    pub fn new(alias: String) -> Self {
        Self {
            response: ApiResponse::ok(),
            alias,
        }
    }
}
