//! Worker thread that owns the tokio runtime and performs every network call.

use std::{sync::Arc, thread};

use client_core::{HttpRagBackend, QuerySubmitter, RagBackend, Settings, UploadSubmitter};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let backend: Arc<dyn RagBackend> = match HttpRagBackend::from_settings(&settings) {
            Ok(backend) => {
                tracing::info!(
                    upload = %backend.endpoints().upload,
                    query = %backend.endpoints().query,
                    "backend worker ready"
                );
                Arc::new(backend)
            }
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!("failed to build http backend: {err}");
                return;
            }
        };
        let uploads = UploadSubmitter::new(Arc::clone(&backend));
        let queries = QuerySubmitter::new(Arc::clone(&backend));
        let _ = ui_tx.try_send(UiEvent::Info(format!("Connected to {}", settings.server_url)));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::UploadDocument { ticket } => {
                        let uploads = uploads.clone();
                        tokio::spawn(async move {
                            let id = ticket.id;
                            let outcome = uploads.submit(ticket).await;
                            if ui_tx.send(UiEvent::UploadFinished { id, outcome }).is_err() {
                                tracing::debug!(submission_id = %id, "ui gone before upload finished");
                            }
                        });
                    }
                    BackendCommand::SubmitQuery { ticket } => {
                        let queries = queries.clone();
                        tokio::spawn(async move {
                            let id = ticket.id;
                            let outcome = queries.submit(ticket).await;
                            if ui_tx.send(UiEvent::QueryFinished { id, outcome }).is_err() {
                                tracing::debug!(submission_id = %id, "ui gone before query finished");
                            }
                        });
                    }
                    BackendCommand::CheckHealth => {
                        let backend = Arc::clone(&backend);
                        tokio::spawn(async move {
                            let outcome = backend.health().await;
                            if let Err(err) = &outcome {
                                tracing::warn!("health check failed: {err}");
                            }
                            let _ = ui_tx.send(UiEvent::HealthChecked(outcome));
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}
