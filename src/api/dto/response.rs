//! Common response envelope shared by every endpoint.

use serde::Serialize;

/// Outcome marker serialized as `"OK"` or `"Error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Envelope returned by all endpoints.
///
/// Success responses carry only `status`; error responses add `error` with a
/// user-facing message. Operation-specific fields are flattened next to it by
/// the endpoint DTOs.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_has_no_error_field() {
        let value = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(value, json!({ "status": "OK" }));
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ApiResponse::error("not found")).unwrap();
        assert_eq!(value, json!({ "status": "Error", "error": "not found" }));
    }
}
