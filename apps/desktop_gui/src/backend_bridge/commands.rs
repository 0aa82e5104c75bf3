//! Backend commands queued from UI to backend worker.

use client_core::state::{QueryTicket, UploadTicket};

pub enum BackendCommand {
    UploadDocument { ticket: UploadTicket },
    SubmitQuery { ticket: QueryTicket },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::UploadDocument { .. } => "upload_document",
            BackendCommand::SubmitQuery { .. } => "submit_query",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
