//! Application error type and its HTTP representation.
//!
//! Every error leaves the service in the same envelope:
//!
//! ```json
//! { "status": "Error", "error": "url already exists" }
//! ```
//!
//! Validation, domain and infrastructure errors are reported with `200 OK`
//! so clients only branch on `status`. Failed authentication is the exception
//! and answers `401 Unauthorized` with a `WWW-Authenticate` challenge.
//!
//! `details` never reaches the client; it is logged when the response is built.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::api::dto::response::ApiResponse;

/// Realm advertised in the basic auth challenge.
pub const AUTH_REALM: &str = "url-shortener";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable category, used only in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let (status, message, details) = match self {
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, message, details)
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (StatusCode::OK, message, details),
        };

        tracing::debug!(code, %details, "request rejected: {}", message);

        let mut response = (status, Json(ApiResponse::error(message))).into_response();

        if status == StatusCode::UNAUTHORIZED
            && let Ok(challenge) =
                HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\""))
        {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }

        response
    }
}

/// Converts field validation failures into a single readable message.
///
/// When several fields fail, the first one in field-name order wins so the
/// message is stable between requests.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let message = fields
            .first()
            .and_then(|(field, errs)| {
                errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("field {field} is not valid"))
                })
            })
            .unwrap_or_else(|| "invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "failed to decode request",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(url(message = "field URL is not a valid URL"))]
        url: String,
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("url already exists", json!({ "alias": "ex1" }));
        assert_eq!(err.to_string(), "url already exists");
        assert_eq!(err.code(), "conflict");
    }

    #[test]
    fn test_validation_errors_keep_field_message() {
        let probe = Probe {
            url: "invalid_url".to_string(),
        };

        let err: AppError = probe.validate().unwrap_err().into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "field URL is not a valid URL");
    }

    #[test]
    fn test_domain_errors_use_ok_status() {
        let response = AppError::not_found("not found", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = AppError::internal("internal error", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = AppError::unauthorized("unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"url-shortener\""
        );
    }
}
