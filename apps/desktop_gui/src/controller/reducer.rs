//! Window model and the transitions UI actions and backend events apply to it.

use std::path::PathBuf;

use client_core::{InteractionState, QueryError, QueryRejection, UploadError};
use shared::domain::SelectedDocument;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Warning,
    Error,
}

/// Dismissible notice above the upload area. Used for rejections, which never
/// change the interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: BannerSeverity,
    pub message: String,
}

impl StatusBanner {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Error,
            message: message.into(),
        }
    }
}

pub enum UiAction {
    DocumentChosen(SelectedDocument),
    DocumentUnreadable { path: PathBuf, reason: String },
    SubmitQuery,
    DismissBanner,
    CheckHealth,
}

pub struct AppModel {
    pub interaction: InteractionState,
    pub banner: Option<StatusBanner>,
    pub status: String,
    /// `None` until the first health probe answers.
    pub server_online: Option<bool>,
    max_upload_bytes: u64,
}

impl AppModel {
    pub fn new(max_upload_bytes: u64) -> Self {
        Self {
            interaction: InteractionState::default(),
            banner: None,
            status: "Starting...".to_string(),
            server_online: None,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Returns the command to queue, if the action was accepted.
    pub fn apply_action(&mut self, action: UiAction) -> Option<BackendCommand> {
        match action {
            UiAction::DocumentChosen(document) => {
                match self
                    .interaction
                    .begin_upload(document, self.max_upload_bytes)
                {
                    Ok(ticket) => {
                        self.banner = None;
                        self.status = format!("Uploading {}", ticket.document.display_name);
                        Some(BackendCommand::UploadDocument { ticket })
                    }
                    Err(err) if err.is_rejection() => {
                        tracing::info!("upload rejected: {err}");
                        self.banner = Some(StatusBanner::warning(err.to_string()));
                        None
                    }
                    Err(err) => {
                        self.banner = Some(StatusBanner::error(err.to_string()));
                        None
                    }
                }
            }
            UiAction::DocumentUnreadable { path, reason } => {
                tracing::warn!(path = %path.display(), "could not read selected file: {reason}");
                self.banner = Some(StatusBanner::error(format!(
                    "Could not read {}: {reason}",
                    path.display()
                )));
                None
            }
            UiAction::SubmitQuery => match self.interaction.begin_query() {
                Ok(ticket) => {
                    self.status = "Waiting for answer...".to_string();
                    Some(BackendCommand::SubmitQuery { ticket })
                }
                Err(QueryRejection::Blank) => None,
                Err(rejection) => {
                    tracing::debug!(?rejection, "query submission ignored");
                    None
                }
            },
            UiAction::DismissBanner => {
                self.banner = None;
                None
            }
            UiAction::CheckHealth => Some(BackendCommand::CheckHealth),
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => self.show_error(err),
            UiEvent::UploadFinished { id, outcome } => {
                if !self.interaction.finish_upload(id, &outcome) {
                    tracing::debug!(submission_id = %id, "dropping stale upload outcome");
                    return;
                }
                self.status = match &outcome {
                    Ok(confirmation) => confirmation.clone(),
                    Err(err) => UiError::from_upload(err).status_line(),
                };
            }
            UiEvent::QueryFinished { id, outcome } => {
                if !self.interaction.finish_query(id, &outcome) {
                    tracing::debug!(submission_id = %id, "dropping stale query outcome");
                    return;
                }
                self.status = match &outcome {
                    Ok(_) => "Answer received".to_string(),
                    Err(err) => UiError::from_query(err).status_line(),
                };
            }
            UiEvent::HealthChecked(outcome) => {
                self.server_online = Some(matches!(&outcome, Ok(health) if health.status == "online"));
                if let Err(err) = outcome {
                    self.status =
                        UiError::from_message(UiErrorContext::Health, err.to_string()).status_line();
                }
            }
        }
    }

    /// Fails the submission carried by a command that never reached the worker.
    pub fn dispatch_failed(&mut self, err: DispatchError) {
        let DispatchError { command, reason } = err;
        match command {
            BackendCommand::UploadDocument { ticket } => {
                self.interaction.finish_upload(
                    ticket.id,
                    &Err(UploadError::Transport {
                        reason: reason.clone(),
                    }),
                );
            }
            BackendCommand::SubmitQuery { ticket } => {
                self.interaction.finish_query(
                    ticket.id,
                    &Err(QueryError::Transport {
                        reason: reason.clone(),
                    }),
                );
            }
            BackendCommand::CheckHealth => {
                self.server_online = Some(false);
            }
        }
        self.banner = Some(StatusBanner::error(reason));
    }

    fn show_error(&mut self, err: UiError) {
        tracing::error!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status = err.status_line();
        self.banner = Some(StatusBanner::error(err.status_line()));
    }
}

#[cfg(test)]
mod tests {
    use client_core::{AnswerView, HealthError, UploadIndicator};
    use shared::{
        domain::{Phase, DEFAULT_MAX_UPLOAD_BYTES},
        protocol::HealthResponse,
    };

    use super::*;

    fn pdf(name: &str) -> SelectedDocument {
        SelectedDocument::new(name, b"%PDF-1.7".to_vec())
    }

    fn start_upload(model: &mut AppModel, name: &str) -> shared::domain::SubmissionId {
        match model.apply_action(UiAction::DocumentChosen(pdf(name))) {
            Some(BackendCommand::UploadDocument { ticket }) => ticket.id,
            _ => panic!("expected an upload command"),
        }
    }

    #[test]
    fn wrong_file_type_raises_banner_and_keeps_state() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        let cmd = model.apply_action(UiAction::DocumentChosen(SelectedDocument::new(
            "notes.txt",
            b"hello".to_vec(),
        )));

        assert!(cmd.is_none());
        assert_eq!(model.interaction, InteractionState::default());
        assert_eq!(
            model.banner,
            Some(StatusBanner::warning("Please select a valid PDF file."))
        );

        model.apply_action(UiAction::DismissBanner);
        assert!(model.banner.is_none());
    }

    #[test]
    fn upload_round_trip_enables_query() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        let id = start_upload(&mut model, "paper.pdf");
        assert_eq!(
            model.interaction.upload_indicator(),
            UploadIndicator::Uploading("paper.pdf")
        );
        assert!(!model.interaction.query_enabled());

        model.apply_event(UiEvent::UploadFinished {
            id,
            outcome: Ok("File uploaded successfully".to_string()),
        });
        assert_eq!(
            model.interaction.upload_indicator(),
            UploadIndicator::Ready("paper.pdf")
        );
        assert!(model.interaction.query_enabled());
        assert_eq!(model.status, "File uploaded successfully");
    }

    #[test]
    fn query_while_uploading_dispatches_nothing() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        start_upload(&mut model, "paper.pdf");
        model.interaction.set_query_text("what is this?");

        assert!(model.apply_action(UiAction::SubmitQuery).is_none());
        assert_eq!(model.interaction.query.phase, Phase::Idle);
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        model.interaction.set_query_text("   ");
        assert!(model.apply_action(UiAction::SubmitQuery).is_none());
        assert_eq!(model.interaction.answer_view(), AnswerView::Empty);
    }

    #[test]
    fn query_error_lands_in_answer_region() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        model.interaction.set_query_text("summarise");
        let Some(BackendCommand::SubmitQuery { ticket }) =
            model.apply_action(UiAction::SubmitQuery)
        else {
            panic!("expected a query command");
        };
        assert_eq!(ticket.query, "summarise");
        assert_eq!(model.interaction.answer_view(), AnswerView::Loading);

        model.apply_event(UiEvent::QueryFinished {
            id: ticket.id,
            outcome: Err(QueryError::Status {
                status: 400,
                message: "No document uploaded".to_string(),
            }),
        });
        assert_eq!(
            model.interaction.answer_view(),
            AnswerView::Error("No document uploaded")
        );
        assert!(model.interaction.query_enabled());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        let first = start_upload(&mut model, "a.pdf");
        model.apply_event(UiEvent::UploadFinished {
            id: first,
            outcome: Ok("ok".to_string()),
        });
        let second = start_upload(&mut model, "b.pdf");

        model.apply_event(UiEvent::UploadFinished {
            id: first,
            outcome: Err(UploadError::Status { status: 500 }),
        });
        assert_eq!(
            model.interaction.upload_indicator(),
            UploadIndicator::Uploading("b.pdf")
        );

        model.apply_event(UiEvent::UploadFinished {
            id: second,
            outcome: Ok("ok".to_string()),
        });
        assert_eq!(
            model.interaction.upload_indicator(),
            UploadIndicator::Ready("b.pdf")
        );
    }

    #[test]
    fn undeliverable_command_fails_its_submission() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        let Some(command) = model.apply_action(UiAction::DocumentChosen(pdf("paper.pdf"))) else {
            panic!("expected an upload command");
        };

        model.dispatch_failed(DispatchError {
            command,
            reason: "worker gone".to_string(),
        });
        assert_eq!(model.interaction.upload_indicator(), UploadIndicator::Failed);
        assert!(model.interaction.upload_enabled());
        assert_eq!(
            model.banner.as_ref().map(|banner| banner.severity),
            Some(BannerSeverity::Error)
        );
    }

    #[test]
    fn health_probe_sets_online_flag() {
        let mut model = AppModel::new(DEFAULT_MAX_UPLOAD_BYTES);
        model.apply_event(UiEvent::HealthChecked(Ok(HealthResponse {
            status: "online".to_string(),
        })));
        assert_eq!(model.server_online, Some(true));

        model.apply_event(UiEvent::HealthChecked(Err(HealthError::Status { status: 502 })));
        assert_eq!(model.server_online, Some(false));
    }
}
