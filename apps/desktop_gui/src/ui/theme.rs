//! Colors and style applied once at startup.

use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(30, 31, 36);
pub const PANEL_STROKE: egui::Color32 = egui::Color32::from_rgb(58, 60, 70);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(148, 150, 160);
pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(35, 165, 90);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(63, 39, 43);
pub const WARNING_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 178, 50);
pub const WARNING_FILL: egui::Color32 = egui::Color32::from_rgb(61, 52, 30);
pub const CODE_FILL: egui::Color32 = egui::Color32::from_rgb(22, 23, 27);

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();
    style.visuals.hyperlink_color = ACCENT;
    style.visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);

    // Make text inputs reliably clickable and visible:
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.interact_size = egui::vec2(40.0, 30.0);
    ctx.set_style(style);
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, PANEL_STROKE))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 10))
}
