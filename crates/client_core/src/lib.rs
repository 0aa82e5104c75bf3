//! Client side of the RAG bot: the two submitters, the interaction state they
//! drive, and the HTTP backend they talk to.

use async_trait::async_trait;
use shared::{
    domain::SelectedDocument,
    protocol::{HealthResponse, UploadResponse},
};

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod state;
pub mod submitter;
pub mod transport;

pub use config::{load_settings, Settings, SettingsError};
pub use controller::InteractionController;
pub use error::{HealthError, QueryError, UploadError};
pub use state::{AnswerView, InteractionState, QueryRejection, UploadIndicator};
pub use submitter::{QuerySubmitter, UploadSubmitter};
pub use transport::HttpRagBackend;

/// The remote ingestion and question-answering service.
#[async_trait]
pub trait RagBackend: Send + Sync {
    async fn upload_document(&self, document: SelectedDocument)
        -> Result<UploadResponse, UploadError>;
    /// Single request, single whole-body reply; returns the answer Markdown.
    async fn query(&self, query: &str) -> Result<String, QueryError>;
    async fn health(&self) -> Result<HealthResponse, HealthError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
