//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{HealthError, QueryError, UploadError};
use shared::{domain::SubmissionId, protocol::HealthResponse};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    UploadFinished {
        id: SubmissionId,
        outcome: Result<String, UploadError>,
    },
    QueryFinished {
        id: SubmissionId,
        outcome: Result<String, QueryError>,
    },
    HealthChecked(Result<HealthResponse, HealthError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Upload,
    Query,
    Health,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("status") {
            UiErrorCategory::Server
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_upload(err: &UploadError) -> Self {
        let category = match err {
            UploadError::Validation(_) | UploadError::Busy => UiErrorCategory::Validation,
            UploadError::Transport { .. } => UiErrorCategory::Transport,
            UploadError::Status { .. } | UploadError::MalformedResponse { .. } => {
                UiErrorCategory::Server
            }
        };
        Self {
            category,
            context: UiErrorContext::Upload,
            message: err.to_string(),
        }
    }

    pub fn from_query(err: &QueryError) -> Self {
        let category = match err {
            QueryError::Transport { .. } => UiErrorCategory::Transport,
            QueryError::Status { .. } | QueryError::MalformedResponse { .. } => {
                UiErrorCategory::Server
            }
        };
        Self {
            category,
            context: UiErrorContext::Query,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        format!("{} error: {}", err_label(self.category), self.message)
    }
}
