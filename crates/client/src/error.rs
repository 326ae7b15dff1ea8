//! Normalized API errors.
//!
//! Every failure that crosses the HTTP boundary is reduced to one uniform
//! shape so screens and commands can render it without caring which layer
//! produced it: a user-facing `message`, the HTTP `status` (`0` when no
//! response was received at all), and an optional backend error `code`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed message shown when no response was received from the backend.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Không thể kết nối đến máy chủ. Vui lòng kiểm tra kết nối mạng.";

/// Fallback message for failures outside the request/response path.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Đã xảy ra lỗi không xác định";

/// A normalized API error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// User-facing message, extracted from the response body when possible.
    pub message: String,
    /// HTTP status of the failed response; `0` for connectivity failures.
    pub status: u16,
    /// Backend-provided error code, when the body carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Connectivity failure: the request never produced a response.
    #[must_use]
    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_owned(),
            status: 0,
            code: None,
        }
    }

    /// Failure outside the request/response path (e.g. a body that could
    /// not be decoded).
    #[must_use]
    pub fn unexpected(detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{UNKNOWN_ERROR_MESSAGE}: {detail}"),
            status: 500,
            code: None,
        }
    }

    /// Client-side rejection raised before a request is issued.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 400,
            code: None,
        }
    }

    /// Build an error from a response status and raw body.
    ///
    /// Message priority: body `message` field, then body `error` field,
    /// then a synthesized `HTTP <status>: <reason>` line.
    #[must_use]
    pub fn from_response(status: u16, reason: &str, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

        let field = |name: &str| -> Option<String> {
            parsed.as_ref().and_then(|v| {
                let value = v.get(name)?;
                match value {
                    serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }
            })
        };

        let message = field("message")
            .or_else(|| field("error"))
            .unwrap_or_else(|| format!("HTTP {status}: {reason}"));

        Self {
            message,
            status,
            code: field("code"),
        }
    }

    /// True when the request never reached the backend.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        self.status == 0
    }

    /// True for HTTP 401, the fatal-to-session case.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_priority_message_field() {
        let err = ApiError::from_response(400, "Bad Request", r#"{"message":"Tên đã tồn tại"}"#);
        assert_eq!(err.message, "Tên đã tồn tại");
        assert_eq!(err.status, 400);
        assert_eq!(err.code, None);
    }

    #[test]
    fn test_message_priority_error_field() {
        let err = ApiError::from_response(409, "Conflict", r#"{"error":"duplicate"}"#);
        assert_eq!(err.message, "duplicate");
    }

    #[test]
    fn test_message_field_beats_error_field() {
        let err =
            ApiError::from_response(400, "Bad Request", r#"{"error":"e","message":"m"}"#);
        assert_eq!(err.message, "m");
    }

    #[test]
    fn test_synthesized_message() {
        let err = ApiError::from_response(502, "Bad Gateway", "<html>oops</html>");
        assert_eq!(err.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_code_extracted() {
        let err = ApiError::from_response(
            422,
            "Unprocessable Entity",
            r#"{"message":"invalid","code":"E_PRICE"}"#,
        );
        assert_eq!(err.code.as_deref(), Some("E_PRICE"));

        let numeric = ApiError::from_response(422, "Unprocessable Entity", r#"{"code":42}"#);
        assert_eq!(numeric.code.as_deref(), Some("42"));
    }

    #[test]
    fn test_network_error_shape() {
        let err = ApiError::network();
        assert_eq!(err.status, 0);
        assert!(err.is_network());
        assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::from_response(401, "Unauthorized", "");
        assert!(err.is_unauthorized());
    }
}
