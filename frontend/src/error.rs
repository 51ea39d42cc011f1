//! Error types for the upload workflow.
//!
//! - [`ValidationError`] - client-side pre-flight checks, never reach the network
//! - [`WorkflowError`] - everything that can end an upload or generate attempt
//! - [`ConfigError`] - bad runtime configuration (unknown `?mode=` value)
//!
//! Every failure is terminal for the current attempt only. The page stays usable.

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// Rejections produced by the file validator, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No file selected.
    #[error("Please select an image file.")]
    MissingFile,

    /// File exceeds the upload limit.
    #[error("File size exceeds 16MB limit.")]
    TooLarge { size: u64 },

    /// Declared MIME type is not an accepted image type.
    #[error("Please upload a valid image file (JPEG, PNG).")]
    UnsupportedType { mime: String },
}

// =============================================================================
// Workflow Errors
// =============================================================================

/// Failures of a single upload or generate attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// File rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx status or a JSON `error` field. Holds the server's message when
    /// it sent one, otherwise the generic HTTP status message.
    #[error("{0}")]
    Server(String),

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// 2xx reply whose body is not a JSON object.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Generate requested before a successful upload captured a filename.
    #[error("Please upload and segment an image first.")]
    MissingPrecondition,
}

impl WorkflowError {
    /// Text shown in the error banner.
    ///
    /// Request failures are prefixed with `Error: `; client-side rejections
    /// are shown as-is.
    pub fn banner_text(&self) -> String {
        match self {
            WorkflowError::Validation(_) | WorkflowError::MissingPrecondition => self.to_string(),
            _ => format!("Error: {}", self),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown workflow mode: {0}")]
    UnknownMode(String),
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
