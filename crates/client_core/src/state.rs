//! Interaction state and its pure transitions.
//!
//! Both front ends drive the same machine: `begin_*` accepts or rejects a
//! submission and hands back a ticket for the network call, `finish_*` applies
//! the outcome of that ticket. Nothing here performs I/O.

use serde::{Deserialize, Serialize};
use shared::domain::{DocumentSummary, Phase, SelectedDocument, SubmissionId};

use crate::error::{QueryError, UploadError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadState {
    pub phase: Phase,
    pub error: Option<String>,
    /// Server confirmation of the last successful upload, kept for diagnostics.
    pub confirmation: Option<String>,
    in_flight: Option<SubmissionId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub text: String,
    pub phase: Phase,
    pub answer: String,
    pub error: Option<String>,
    in_flight: Option<SubmissionId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub document: Option<DocumentSummary>,
    pub upload: UploadState,
    pub query: QueryState,
    /// Error shown in the answer region; set by either submitter's failure.
    pub error: Option<String>,
}

/// Accepted upload; owns the bytes for the single network call.
#[derive(Debug)]
pub struct UploadTicket {
    pub id: SubmissionId,
    pub document: SelectedDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub id: SubmissionId,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRejection {
    Blank,
    UploadInProgress,
    QueryInProgress,
}

/// What the answer region displays; exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerView<'a> {
    Empty,
    Loading,
    Error(&'a str),
    Answer(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadIndicator<'a> {
    None,
    Uploading(&'a str),
    Ready(&'a str),
    Failed,
}

impl InteractionState {
    pub fn query_enabled(&self) -> bool {
        !self.upload.phase.is_in_progress() && !self.query.phase.is_in_progress()
    }

    pub fn upload_enabled(&self) -> bool {
        !self.upload.phase.is_in_progress()
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    /// Validates the document before touching any state: a rejected document
    /// leaves the previous selection and upload phase as they were.
    pub fn begin_upload(
        &mut self,
        document: SelectedDocument,
        max_upload_bytes: u64,
    ) -> Result<UploadTicket, UploadError> {
        document.validate(max_upload_bytes)?;
        if self.upload.phase.is_in_progress() {
            return Err(UploadError::Busy);
        }

        let id = SubmissionId::new();
        self.document = Some(document.summary());
        self.upload.phase = Phase::InProgress;
        self.upload.error = None;
        self.upload.in_flight = Some(id);
        self.error = None;
        Ok(UploadTicket { id, document })
    }

    /// Returns false when the outcome belongs to a submission that is no longer
    /// in flight.
    pub fn finish_upload(&mut self, id: SubmissionId, outcome: &Result<String, UploadError>) -> bool {
        if self.upload.in_flight != Some(id) {
            return false;
        }
        self.upload.in_flight = None;
        match outcome {
            Ok(confirmation) => {
                self.upload.phase = Phase::Succeeded;
                self.upload.confirmation = Some(confirmation.clone());
            }
            Err(err) => {
                let message = err.to_string();
                self.upload.phase = Phase::Failed;
                self.upload.error = Some(message.clone());
                self.error = Some(message);
            }
        }
        true
    }

    /// Uses the current query text. Blank text and a disabled control are
    /// rejections that change nothing.
    pub fn begin_query(&mut self) -> Result<QueryTicket, QueryRejection> {
        let trimmed = self.query.text.trim();
        if trimmed.is_empty() {
            return Err(QueryRejection::Blank);
        }
        if self.upload.phase.is_in_progress() {
            return Err(QueryRejection::UploadInProgress);
        }
        if self.query.phase.is_in_progress() {
            return Err(QueryRejection::QueryInProgress);
        }

        let ticket = QueryTicket {
            id: SubmissionId::new(),
            query: trimmed.to_string(),
        };
        self.query.phase = Phase::InProgress;
        self.query.answer.clear();
        self.query.error = None;
        self.query.in_flight = Some(ticket.id);
        self.error = None;
        Ok(ticket)
    }

    pub fn finish_query(&mut self, id: SubmissionId, outcome: &Result<String, QueryError>) -> bool {
        if self.query.in_flight != Some(id) {
            return false;
        }
        self.query.in_flight = None;
        match outcome {
            Ok(answer) => {
                self.query.phase = Phase::Succeeded;
                self.query.answer = answer.clone();
            }
            Err(err) => {
                let message = err.to_string();
                self.query.phase = Phase::Failed;
                self.query.error = Some(message.clone());
                self.error = Some(message);
            }
        }
        true
    }

    pub fn answer_view(&self) -> AnswerView<'_> {
        if self.query.phase.is_in_progress() && self.query.answer.is_empty() {
            AnswerView::Loading
        } else if let Some(error) = self.error.as_deref() {
            AnswerView::Error(error)
        } else if !self.query.answer.is_empty() {
            AnswerView::Answer(&self.query.answer)
        } else {
            AnswerView::Empty
        }
    }

    pub fn upload_indicator(&self) -> UploadIndicator<'_> {
        let Some(document) = self.document.as_ref() else {
            return UploadIndicator::None;
        };
        match self.upload.phase {
            Phase::InProgress => UploadIndicator::Uploading(&document.display_name),
            Phase::Succeeded => UploadIndicator::Ready(&document.display_name),
            Phase::Failed => UploadIndicator::Failed,
            Phase::Idle => UploadIndicator::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::DEFAULT_MAX_UPLOAD_BYTES;

    use super::*;

    fn pdf(name: &str) -> SelectedDocument {
        SelectedDocument::new(name, b"%PDF-1.4".to_vec())
    }

    #[test]
    fn non_pdf_selection_changes_nothing() {
        let mut state = InteractionState::default();
        let ticket = state
            .begin_upload(pdf("first.pdf"), DEFAULT_MAX_UPLOAD_BYTES)
            .expect("accepted");
        assert!(state.finish_upload(ticket.id, &Ok("ok".into())));
        let before = state.clone();

        let err = state
            .begin_upload(
                SelectedDocument::new("notes.txt", b"text".to_vec()),
                DEFAULT_MAX_UPLOAD_BYTES,
            )
            .expect_err("rejected");
        assert!(err.is_rejection());
        assert_eq!(state, before);
    }

    #[test]
    fn upload_failure_sets_panel_and_shared_error() {
        let mut state = InteractionState::default();
        let ticket = state
            .begin_upload(pdf("doc.pdf"), DEFAULT_MAX_UPLOAD_BYTES)
            .expect("accepted");
        assert_eq!(state.upload_indicator(), UploadIndicator::Uploading("doc.pdf"));
        assert!(!state.query_enabled());

        state.finish_upload(ticket.id, &Err(UploadError::Status { status: 500 }));
        assert_eq!(state.upload.phase, Phase::Failed);
        assert_eq!(state.upload.error.as_deref(), Some("File upload failed."));
        assert_eq!(state.upload_indicator(), UploadIndicator::Failed);
        assert_eq!(state.answer_view(), AnswerView::Error("File upload failed."));
        assert!(state.query_enabled());
    }

    #[test]
    fn second_upload_is_rejected_while_one_is_pending() {
        let mut state = InteractionState::default();
        state
            .begin_upload(pdf("a.pdf"), DEFAULT_MAX_UPLOAD_BYTES)
            .expect("accepted");
        let err = state
            .begin_upload(pdf("b.pdf"), DEFAULT_MAX_UPLOAD_BYTES)
            .expect_err("busy");
        assert_eq!(err, UploadError::Busy);
        assert_eq!(
            state.document.as_ref().map(|d| d.display_name.as_str()),
            Some("a.pdf")
        );
    }

    #[test]
    fn blank_query_is_a_silent_no_op() {
        let mut state = InteractionState::default();
        state.set_query_text("   \n\t ");
        let before = state.clone();
        assert_eq!(state.begin_query(), Err(QueryRejection::Blank));
        assert_eq!(state, before);
    }

    #[test]
    fn query_is_blocked_while_uploading() {
        let mut state = InteractionState::default();
        state
            .begin_upload(pdf("doc.pdf"), DEFAULT_MAX_UPLOAD_BYTES)
            .expect("accepted");
        state.set_query_text("what is covered?");
        assert_eq!(state.begin_query(), Err(QueryRejection::UploadInProgress));
        assert_eq!(state.query.phase, Phase::Idle);
    }

    #[test]
    fn query_success_replaces_previous_answer() {
        let mut state = InteractionState::default();
        state.set_query_text("  first  ");
        let first = state.begin_query().expect("accepted");
        assert_eq!(first.query, "first");
        assert_eq!(state.answer_view(), AnswerView::Loading);
        state.finish_query(first.id, &Ok("one".into()));
        assert_eq!(state.answer_view(), AnswerView::Answer("one"));

        state.set_query_text("second");
        let second = state.begin_query().expect("accepted");
        assert!(state.query.answer.is_empty());
        assert_eq!(state.begin_query(), Err(QueryRejection::QueryInProgress));
        state.finish_query(
            second.id,
            &Err(QueryError::Status {
                status: 422,
                message: "bad query".into(),
            }),
        );
        assert_eq!(state.query.phase, Phase::Failed);
        assert_eq!(state.answer_view(), AnswerView::Error("bad query"));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = InteractionState::default();
        state.set_query_text("question");
        let ticket = state.begin_query().expect("accepted");

        assert!(!state.finish_query(SubmissionId::new(), &Ok("stale".into())));
        assert_eq!(state.query.phase, Phase::InProgress);

        assert!(state.finish_query(ticket.id, &Ok("fresh".into())));
        assert!(!state.finish_query(ticket.id, &Ok("again".into())));
        assert_eq!(state.query.answer, "fresh");
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = InteractionState::default();
        state.set_query_text("q");
        let ticket = state.begin_query().expect("accepted");
        state.finish_query(ticket.id, &Ok("a".into()));

        let json = serde_json::to_string(&state).expect("serialize");
        let restored: InteractionState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, state);
    }
}
