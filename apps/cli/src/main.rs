use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, logging, markdown, HttpRagBackend, InteractionController, UploadError,
};
use shared::domain::SelectedDocument;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "ragbot", about = "Upload a PDF to a RAG service and ask questions about it")]
struct Cli {
    /// Base URL of the RAG service; overrides config and environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF and rebuild the service's index from it.
    Upload { file: PathBuf },
    /// Ask one question about the uploaded document.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Print the Markdown answer as received.
        #[arg(long)]
        raw: bool,
    },
    /// Optionally upload a PDF, then answer questions read line by line from stdin.
    Chat {
        file: Option<PathBuf>,
        #[arg(long)]
        raw: bool,
    },
    /// Check whether the service is online.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing("warn");
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())
        .context("failed to load settings")?
        .with_server_url_override(cli.server_url);
    let backend = HttpRagBackend::from_settings(&settings).context("invalid service settings")?;
    tracing::debug!(upload = %backend.endpoints().upload, query = %backend.endpoints().query, "endpoints resolved");
    let mut controller = InteractionController::new(Arc::new(backend), settings.max_upload_bytes);

    match cli.command {
        Command::Upload { file } => upload(&mut controller, file).await,
        Command::Ask { question, raw } => {
            let question = question.join(" ");
            match controller.submit_query(&question).await {
                Ok(Some(answer)) => {
                    print_answer(&answer, raw);
                    Ok(())
                }
                Ok(None) => bail!("nothing to ask: the question is empty"),
                Err(err) => bail!("{err}"),
            }
        }
        Command::Chat { file, raw } => {
            if let Some(file) = file {
                upload(&mut controller, file).await?;
            }
            eprintln!("Ask me anything about your document (Ctrl-D to quit).");
            let mut lines = BufReader::new(stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                match controller.submit_query(&line).await {
                    Ok(Some(answer)) => print_answer(&answer, raw),
                    Ok(None) => {}
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Ok(())
        }
        Command::Status => match controller.check_health().await {
            Ok(health) => {
                println!("{} ({})", health.status, settings.server_url);
                Ok(())
            }
            Err(err) => bail!("{err}"),
        },
    }
}

async fn upload(controller: &mut InteractionController, file: PathBuf) -> Result<()> {
    let document = SelectedDocument::from_path(&file)
        .with_context(|| format!("could not read '{}'", file.display()))?;
    let name = document.display_name.clone();
    eprintln!("Uploading: {name}");
    match controller.submit_upload(document).await {
        Ok(_) => {
            eprintln!("Ready to query: {name}");
            Ok(())
        }
        Err(err @ UploadError::Validation(_)) => bail!("{err}"),
        Err(err) => bail!("Upload failed. Please try again. ({err})"),
    }
}

fn print_answer(answer: &str, raw: bool) {
    if raw {
        println!("{answer}");
    } else {
        println!("{}", markdown::render(answer).plain_text());
    }
}
