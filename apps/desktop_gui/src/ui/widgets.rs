//! Small drawing helpers: the Markdown answer view and byte-size labels.

use client_core::markdown::{Block, BlockKind, RenderedMarkdown, Span};
use eframe::egui;

use crate::ui::theme;

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

/// Caption under the upload button, e.g. `PDF (MAX. 800MB)`.
pub fn upload_limit_label(max_upload_bytes: u64) -> String {
    format!(
        "PDF (MAX. {})",
        human_readable_bytes(max_upload_bytes).replace(' ', "")
    )
}

// Body-sized bold text.
const TABLE_HEADER_LEVEL: u8 = 6;
const LIST_MARKER_WIDTH: f32 = 14.0;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 24.0,
        2 => 20.0,
        3 => 17.0,
        4 | 5 => 15.0,
        _ => 14.0,
    }
}

fn span_text(span: &Span, heading: Option<u8>) -> egui::RichText {
    let mut text = egui::RichText::new(&span.text);
    if let Some(level) = heading {
        text = text.size(heading_size(level)).strong();
    }
    if span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.strikethrough {
        text = text.strikethrough();
    }
    if span.style.code {
        text = text.code();
    }
    text
}

fn draw_spans(ui: &mut egui::Ui, spans: &[Span], heading: Option<u8>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let text = span_text(span, heading);
            match &span.style.link {
                Some(url) => {
                    ui.hyperlink_to(text, url);
                }
                None => {
                    ui.label(text);
                }
            }
        }
    });
}

fn draw_block(ui: &mut egui::Ui, block: &Block) {
    match &block.kind {
        BlockKind::Paragraph => draw_spans(ui, &block.spans, None),
        BlockKind::Heading(level) => draw_spans(ui, &block.spans, Some(*level)),
        BlockKind::ListItem { depth, marker } => {
            ui.horizontal(|ui| {
                ui.add_space(16.0 * (*depth as f32));
                ui.label(egui::RichText::new(marker).color(theme::MUTED_TEXT));
                ui.vertical(|ui| draw_spans(ui, &block.spans, None));
            });
        }
        BlockKind::ListParagraph { depth } => {
            ui.horizontal(|ui| {
                ui.add_space(16.0 * (*depth as f32) + LIST_MARKER_WIDTH);
                ui.vertical(|ui| draw_spans(ui, &block.spans, None));
            });
        }
        BlockKind::Quote { depth } => {
            ui.horizontal(|ui| {
                for _ in 0..*depth {
                    ui.separator();
                }
                ui.vertical(|ui| draw_spans(ui, &block.spans, None));
            });
        }
        BlockKind::CodeBlock => {
            egui::Frame::new()
                .fill(theme::CODE_FILL)
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(block.text().trim_end()).monospace());
                });
        }
        BlockKind::TableRow { header } => {
            draw_spans(ui, &block.spans, header.then_some(TABLE_HEADER_LEVEL));
            if *header {
                ui.separator();
            }
        }
        BlockKind::Rule => {
            ui.separator();
        }
    }
}

pub fn markdown_view(ui: &mut egui::Ui, rendered: &RenderedMarkdown) {
    for (index, block) in rendered.blocks.iter().enumerate() {
        if index > 0 {
            ui.add_space(6.0);
        }
        draw_block(ui, block);
    }
}
