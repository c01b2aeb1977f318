//! Workflow error types.

use pathya_client::ClientError;
use pathya_core::AdminTier;
use thiserror::Error;

/// Errors raised by the workflow layer.
///
/// Validation and transition errors are raised before any network call is
/// attempted; client errors pass through transparently.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input failed validation; nothing was sent to the backend.
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The requested status change is not a defined edge; nothing was sent.
    #[error("No {action} transition from status {status}")]
    InvalidTransition {
        status: String,
        action: &'static str,
    },

    /// The operation does not exist at this tier.
    #[error("Operation not available at tier {0}")]
    TierNotApplicable(AdminTier),

    /// Backend or transport failure from the client layer.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl WorkflowError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        WorkflowError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Type alias for Results using [`WorkflowError`].
pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

/// Run validator-derived checks, folding failures into a workflow
/// validation error.
pub(crate) fn validate_payload<T: validator::Validate>(payload: &T) -> WorkflowResult<()> {
    payload
        .validate()
        .map_err(|e| WorkflowError::Validation {
            field: "payload".to_string(),
            message: e.to_string(),
        })
}
