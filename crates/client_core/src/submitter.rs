//! One outbound call per accepted ticket, with the logging around it.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    error::{QueryError, UploadError},
    state::{QueryTicket, UploadTicket},
    RagBackend,
};

#[derive(Clone)]
pub struct UploadSubmitter {
    backend: Arc<dyn RagBackend>,
}

impl UploadSubmitter {
    pub fn new(backend: Arc<dyn RagBackend>) -> Self {
        Self { backend }
    }

    /// Returns the server's confirmation message.
    pub async fn submit(&self, ticket: UploadTicket) -> Result<String, UploadError> {
        let UploadTicket { id, document } = ticket;
        let filename = document.display_name.clone();
        info!(submission_id = %id, %filename, size_bytes = document.size_bytes(), "upload: sending document");

        match self.backend.upload_document(document).await {
            Ok(response) => {
                info!(submission_id = %id, %filename, confirmation = %response.message, "upload: accepted");
                Ok(response.message)
            }
            Err(err) => {
                error!(submission_id = %id, %filename, "upload: failed: {err:?}");
                Err(err)
            }
        }
    }
}

#[derive(Clone)]
pub struct QuerySubmitter {
    backend: Arc<dyn RagBackend>,
}

impl QuerySubmitter {
    pub fn new(backend: Arc<dyn RagBackend>) -> Self {
        Self { backend }
    }

    /// Returns the answer as Markdown.
    pub async fn submit(&self, ticket: QueryTicket) -> Result<String, QueryError> {
        info!(submission_id = %ticket.id, query_len = ticket.query.len(), "query: sending");

        match self.backend.query(&ticket.query).await {
            Ok(answer) => {
                info!(submission_id = %ticket.id, answer_len = answer.len(), "query: answered");
                Ok(answer)
            }
            Err(err @ QueryError::Status { .. }) => {
                warn!(submission_id = %ticket.id, "query: server error: {err:?}");
                Err(err)
            }
            Err(err) => {
                error!(submission_id = %ticket.id, "query: failed: {err:?}");
                Err(err)
            }
        }
    }
}
