//! Error handling module for the pharmacy product admin.
//!
//! Provides the error taxonomy shared by the HTTP client, the draft editor and the controller.

use serde::Deserialize;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const INVALID_FIELD: &str = "INVALID_FIELD";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminError {
    /// No response was obtained from the backend
    Transport(String),
    /// The backend answered with a non-success status
    Status { status: u16, message: String },
    /// The draft failed pre-submit validation
    Validation(String),
    /// A response body could not be decoded
    Decode(String),
    /// Unknown form field or a value of the wrong kind
    InvalidField(String),
    /// Product not present in the local collection
    NotFound(String),
    /// Reading a file for upload failed
    Io(String),
}

impl AdminError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Transport(_) => codes::TRANSPORT_ERROR,
            AdminError::Status { .. } => codes::HTTP_STATUS,
            AdminError::Validation(_) => codes::VALIDATION_ERROR,
            AdminError::Decode(_) => codes::DECODE_ERROR,
            AdminError::InvalidField(_) => codes::INVALID_FIELD,
            AdminError::NotFound(_) => codes::NOT_FOUND,
            AdminError::Io(_) => codes::IO_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AdminError::Transport(msg) => msg.clone(),
            AdminError::Status { message, .. } => message.clone(),
            AdminError::Validation(msg) => msg.clone(),
            AdminError::Decode(msg) => msg.clone(),
            AdminError::InvalidField(msg) => msg.clone(),
            AdminError::NotFound(msg) => msg.clone(),
            AdminError::Io(msg) => msg.clone(),
        }
    }

    /// HTTP status of the failed request, if a response was obtained.
    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a status error from a response body, preferring the backend's own message.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        AdminError::Status { status, message }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            AdminError::Decode(format!("Invalid response body: {}", err))
        } else {
            AdminError::Transport(format!("Network error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AdminError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AdminError::Io(format!("I/O error: {}", err))
    }
}

/// Error object returned by the backend on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_used_verbatim() {
        let err = AdminError::from_status_body(400, r#"{"message":"Product name already exists"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Product name already exists");
    }

    #[test]
    fn test_fallback_message_without_body() {
        let err = AdminError::from_status_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message(), "Request failed with status 502");

        let err = AdminError::from_status_body(500, r#"{"message":"  "}"#);
        assert_eq!(err.message(), "Request failed with status 500");
    }

    #[test]
    fn test_display_includes_code() {
        let err = AdminError::Validation("Please fill in all required fields".to_string());
        assert_eq!(
            err.to_string(),
            "VALIDATION_ERROR: Please fill in all required fields"
        );
        assert_eq!(err.status(), None);
    }
}
