use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Any non-2xx response, whatever the status category.
    #[error("Request failed: {status} {reason}{}", .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    RequestFailed { status: u16, reason: String, detail: Option<String> },

    /// DNS, connect, timeout and other transport failures.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Builds a `RequestFailed` from a status and the raw error body, pulling out the
    /// server's message when the body has one.
    pub fn request_failed(status: reqwest::StatusCode, body: &str) -> Self {
        GatewayError::RequestFailed {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail: error_detail(body),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() { GatewayError::Decode(error.to_string()) } else { GatewayError::Network(error.to_string()) }
    }
}

#[derive(Deserialize)]
struct ErrorBody { error: ErrorValue }

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorValue {
    Object { message: Option<String>, #[serde(rename = "type")] kind: Option<String> },
    Code(String),
}

fn error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body).ok()?.error {
        ErrorValue::Object { message: Some(message), .. } => Some(message),
        ErrorValue::Object { message: None, kind } => kind,
        ErrorValue::Code(code) => Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn message_from_error_object() {
        let body = r#"{"error":{"type":"INVALID_VALUE_FOR_COLUMN","message":"Field \"title\" cannot accept the provided value"}}"#;
        let error = GatewayError::request_failed(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(error.to_string(), "Request failed: 422 Unprocessable Entity (Field \"title\" cannot accept the provided value)");
    }

    #[test]
    fn error_code_string() {
        let error = GatewayError::request_failed(StatusCode::NOT_FOUND, r#"{"error":"NOT_FOUND"}"#);
        assert_eq!(error.to_string(), "Request failed: 404 Not Found (NOT_FOUND)");
    }

    #[test]
    fn unparseable_body_keeps_status_line() {
        let error = GatewayError::request_failed(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(error.to_string(), "Request failed: 502 Bad Gateway");
    }
}
