//! Async driver over [`InteractionState`] for front ends that can simply await.
//!
//! Methods take `&mut self`, so a submission cannot start while another one
//! started by this controller is pending. The phase checks in the state still
//! apply and are what the GUI relies on.

use std::sync::Arc;

use shared::{domain::SelectedDocument, protocol::HealthResponse};
use tracing::debug;

use crate::{
    error::{HealthError, QueryError, UploadError},
    state::InteractionState,
    submitter::{QuerySubmitter, UploadSubmitter},
    RagBackend,
};

pub struct InteractionController {
    state: InteractionState,
    backend: Arc<dyn RagBackend>,
    uploads: UploadSubmitter,
    queries: QuerySubmitter,
    max_upload_bytes: u64,
}

impl InteractionController {
    pub fn new(backend: Arc<dyn RagBackend>, max_upload_bytes: u64) -> Self {
        Self {
            state: InteractionState::default(),
            uploads: UploadSubmitter::new(backend.clone()),
            queries: QuerySubmitter::new(backend.clone()),
            backend,
            max_upload_bytes,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Rejections (wrong type, too large, busy) return before any request and
    /// leave the state untouched.
    pub async fn submit_upload(&mut self, document: SelectedDocument) -> Result<String, UploadError> {
        let ticket = self.state.begin_upload(document, self.max_upload_bytes)?;
        let id = ticket.id;
        let outcome = self.uploads.submit(ticket).await;
        self.state.finish_upload(id, &outcome);
        outcome
    }

    /// `Ok(None)` means the submission was ignored: blank text or the query
    /// control is disabled.
    pub async fn submit_query(&mut self, text: &str) -> Result<Option<String>, QueryError> {
        self.state.set_query_text(text);
        let ticket = match self.state.begin_query() {
            Ok(ticket) => ticket,
            Err(rejection) => {
                debug!(?rejection, "query: submission ignored");
                return Ok(None);
            }
        };
        let id = ticket.id;
        let outcome = self.queries.submit(ticket).await;
        self.state.finish_query(id, &outcome);
        outcome.map(Some)
    }

    pub async fn check_health(&self) -> Result<HealthResponse, HealthError> {
        self.backend.health().await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
