//! Typed failures for the two submitters and the health probe.
//!
//! Every variant renders to a display-ready message; the UI shows
//! `to_string()` verbatim and never needs to inspect the cause.

use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("An upload is already in progress.")]
    Busy,
    #[error("File upload failed.")]
    Status { status: u16 },
    #[error("An error occurred during upload: {reason}")]
    Transport { reason: String },
    #[error("An error occurred during upload: malformed response ({reason})")]
    MalformedResponse { reason: String },
}

impl UploadError {
    /// Rejections happen before any request and leave upload state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(self, UploadError::Validation(_) | UploadError::Busy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("An error occurred while fetching the response")]
    Transport { reason: String },
    #[error("An error occurred while fetching the response")]
    MalformedResponse { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    #[error("server unreachable: {reason}")]
    Transport { reason: String },
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("unexpected health payload: {reason}")]
    MalformedResponse { reason: String },
}
