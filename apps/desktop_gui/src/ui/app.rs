//! App shell: owns the window model, drains backend events, and lays out panels.

use std::path::{Path, PathBuf};

use client_core::{
    markdown::{self, RenderedMarkdown},
    AnswerView,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::SelectedDocument;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{AppModel, UiAction},
};
use crate::ui::{panels, theme};

pub struct RagBotApp {
    model: AppModel,
    server_url: String,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    last_dir: Option<PathBuf>,
    /// Last answer and its parsed form, so Markdown is parsed once per answer.
    answer_cache: Option<(String, RenderedMarkdown)>,
    theme_applied: bool,
}

impl RagBotApp {
    pub fn new(
        server_url: String,
        max_upload_bytes: u64,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            model: AppModel::new(max_upload_bytes),
            server_url,
            cmd_tx,
            ui_rx,
            last_dir: None,
            answer_cache: None,
            theme_applied: false,
        };
        app.perform(UiAction::CheckHealth);
        app
    }

    fn perform(&mut self, action: UiAction) {
        if let Some(cmd) = self.model.apply_action(action) {
            if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.model.status) {
                self.model.dispatch_failed(err);
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply_event(event);
        }
    }

    fn choose_document(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.last_dir = Some(parent.to_path_buf());
        }
        let action = match SelectedDocument::from_path(path) {
            Ok(document) => UiAction::DocumentChosen(document),
            Err(err) => UiAction::DocumentUnreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        };
        self.perform(action);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.model.interaction.upload_enabled() {
            return;
        }
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.choose_document(&path);
        }
    }

    fn refresh_answer_cache(&mut self) {
        let AnswerView::Answer(answer) = self.model.interaction.answer_view() else {
            return;
        };
        let stale = self
            .answer_cache
            .as_ref()
            .is_none_or(|(source, _)| source != answer);
        if stale {
            self.answer_cache = Some((answer.to_string(), markdown::render(answer)));
        }
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| panels::status_bar(ui, &self.model.status));

        let (picked, actions) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_max_width(760.0);
                        let mut actions = Vec::new();

                        actions.extend(panels::header(
                            ui,
                            self.model.server_online,
                            &self.server_url,
                        ));
                        ui.add_space(8.0);

                        if let Some(banner) = self.model.banner.as_ref() {
                            actions.extend(panels::banner(ui, banner));
                            ui.add_space(8.0);
                        }

                        let picked =
                            panels::upload_panel(ui, &self.model, self.last_dir.as_deref());
                        ui.add_space(12.0);

                        actions.extend(panels::query_form(ui, &mut self.model));
                        ui.add_space(12.0);

                        let rendered = self.answer_cache.as_ref().map(|(_, rendered)| rendered);
                        panels::answer_panel(ui, self.model.interaction.answer_view(), rendered);

                        (picked, actions)
                    })
                    .inner
            })
            .inner;

        if let Some(path) = picked {
            self.choose_document(&path);
        }
        for action in actions {
            self.perform(action);
        }
    }
}

impl eframe::App for RagBotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }

        self.process_ui_events();
        self.handle_dropped_files(ctx);
        self.refresh_answer_cache();
        self.show_main(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
