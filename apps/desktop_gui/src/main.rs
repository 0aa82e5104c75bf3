use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, logging::init_tracing};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::RagBotApp;

#[derive(Parser, Debug)]
#[command(name = "ragbot-gui", about = "Desktop window for asking questions about a PDF")]
struct Args {
    /// Base URL of the RAG service, overriding configuration.
    #[arg(long)]
    server_url: Option<String>,
    /// Explicit settings file; replaces the default lookup.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let settings =
        load_settings(args.config.as_deref())?.with_server_url_override(args.server_url);
    // Reject a bad URL before opening the window.
    settings.endpoints()?;

    let server_url = settings.server_url.clone();
    let max_upload_bytes = settings.max_upload_bytes;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("RAG Bot")
            .with_inner_size([860.0, 720.0])
            .with_min_inner_size([520.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "RAG Bot",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(RagBotApp::new(
                server_url,
                max_upload_bytes,
                cmd_tx,
                ui_rx,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop window: {err}"))
}
