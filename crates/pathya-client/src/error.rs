//! Client error taxonomy.
//!
//! Three failure families reach callers: transport failures, HTTP-level
//! failures, and backend-reported failures (a 2xx body carrying
//! `success: false`). None of them are retried here; the caller re-triggers
//! the operation explicitly.

use thiserror::Error;

/// Errors produced by [`crate::BackendClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client construction or URL problems.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Network or timeout failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response that is not a 404 or 409.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body reported `success: false`.
    #[error("Backend rejected the operation: {message}")]
    Backend { message: String },

    /// 404 response, mapped distinctly so callers can tell "not configured"
    /// apart from a failed fetch.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 409 response. Surfaced for the operator to re-check state; never
    /// retried automatically.
    #[error("Conflicting update: {0}")]
    Conflict(String),

    /// Response body could not be deserialized.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether this error is a 404 mapping.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Whether this error is a 409 conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict(_))
    }
}

/// Type alias for Results using [`ClientError`].
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = ClientError::NotFound("RequisitionWindow".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ClientError::Http {
            status: 500,
            message: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn backend_rejection_display() {
        let err = ClientError::Backend {
            message: "window closed".to_string(),
        };
        assert!(err.to_string().contains("window closed"));
    }
}
