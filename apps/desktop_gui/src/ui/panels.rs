//! Panels of the single-window layout. Each returns the action the user took,
//! if any, and never mutates interaction state beyond the query text buffer.

use std::path::{Path, PathBuf};

use client_core::{markdown::RenderedMarkdown, AnswerView, UploadIndicator};
use eframe::egui;

use crate::controller::reducer::{AppModel, BannerSeverity, StatusBanner, UiAction};
use crate::ui::{theme, widgets};

pub fn header(ui: &mut egui::Ui, server_online: Option<bool>, server_url: &str) -> Option<UiAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("RAG Bot").strong());
        ui.add_space(8.0);
        let (color, label) = match server_online {
            Some(true) => (theme::SUCCESS_TEXT, "online"),
            Some(false) => (theme::ERROR_TEXT, "offline"),
            None => (theme::MUTED_TEXT, "checking..."),
        };
        ui.colored_label(color, "●");
        ui.label(egui::RichText::new(format!("{server_url} ({label})")).color(theme::MUTED_TEXT));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Recheck").clicked() {
                action = Some(UiAction::CheckHealth);
            }
        });
    });
    action
}

pub fn banner(ui: &mut egui::Ui, banner: &StatusBanner) -> Option<UiAction> {
    let (fill, text) = match banner.severity {
        BannerSeverity::Warning => (theme::WARNING_FILL, theme::WARNING_TEXT),
        BannerSeverity::Error => (theme::ERROR_FILL, theme::ERROR_TEXT),
    };
    let mut action = None;
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, text))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.colored_label(text, &banner.message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                        action = Some(UiAction::DismissBanner);
                    }
                });
            });
        });
    action
}

/// Returns the path the user picked; reading it is left to the caller.
pub fn upload_panel(ui: &mut egui::Ui, model: &AppModel, last_dir: Option<&Path>) -> Option<PathBuf> {
    let state = &model.interaction;
    let uploading = state.upload.phase.is_in_progress();
    let mut picked = None;

    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            let label = if uploading {
                "Uploading..."
            } else {
                "Click to upload a PDF"
            };
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(220.0, 36.0));
            if ui.add_enabled(state.upload_enabled(), button).clicked() {
                let mut dialog = rfd::FileDialog::new().add_filter("PDF", &["pdf"]);
                if let Some(dir) = last_dir
                    .map(Path::to_path_buf)
                    .or_else(dirs::document_dir)
                    .or_else(dirs::home_dir)
                {
                    dialog = dialog.set_directory(dir);
                }
                picked = dialog.pick_file();
            }
            ui.label(
                egui::RichText::new(widgets::upload_limit_label(model.max_upload_bytes()))
                    .small()
                    .color(theme::MUTED_TEXT),
            );
            ui.label(
                egui::RichText::new("or drop a file onto the window")
                    .small()
                    .color(theme::MUTED_TEXT),
            );
        });

        ui.add_space(6.0);
        match state.upload_indicator() {
            UploadIndicator::None => {}
            UploadIndicator::Uploading(name) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Uploading: {name}"));
                });
            }
            UploadIndicator::Ready(name) => {
                let size = state
                    .document
                    .as_ref()
                    .map(|doc| widgets::human_readable_bytes(doc.size_bytes))
                    .unwrap_or_default();
                ui.horizontal(|ui| {
                    ui.colored_label(theme::SUCCESS_TEXT, format!("Ready to query: {name}"));
                    ui.label(egui::RichText::new(size).small().color(theme::MUTED_TEXT));
                });
            }
            UploadIndicator::Failed => {
                ui.colored_label(theme::ERROR_TEXT, "Upload failed. Please try again.");
            }
        }
    });

    picked
}

pub fn query_form(ui: &mut egui::Ui, model: &mut AppModel) -> Option<UiAction> {
    let enabled = model.interaction.query_enabled();
    let mut submit = false;

    ui.horizontal(|ui| {
        let button_width = 90.0;
        let edit = egui::TextEdit::singleline(&mut model.interaction.query.text)
            .hint_text("Ask me anything about your document...")
            .desired_width(ui.available_width() - button_width);
        let edit_resp = ui.add_enabled(enabled, edit);
        if edit_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }

        let has_text = !model.interaction.query.text.trim().is_empty();
        let label = if model.interaction.query.phase.is_in_progress() {
            "Asking..."
        } else {
            "Ask"
        };
        if ui
            .add_enabled(enabled && has_text, egui::Button::new(label))
            .clicked()
        {
            submit = true;
        }
    });

    submit.then_some(UiAction::SubmitQuery)
}

pub fn answer_panel(ui: &mut egui::Ui, view: AnswerView<'_>, rendered: Option<&RenderedMarkdown>) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        match view {
            AnswerView::Empty => {
                ui.label(
                    egui::RichText::new("Upload a PDF, then ask a question about it.")
                        .color(theme::MUTED_TEXT),
                );
            }
            AnswerView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Thinking...");
                });
            }
            AnswerView::Error(message) => {
                ui.colored_label(theme::ERROR_TEXT, message);
            }
            AnswerView::Answer(markdown) => match rendered {
                Some(rendered) => widgets::markdown_view(ui, rendered),
                None => {
                    ui.label(markdown);
                }
            },
        }
    });
}

pub fn status_bar(ui: &mut egui::Ui, status: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(status).small().color(theme::MUTED_TEXT));
    });
}
