//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// A command that never reached the worker, handed back so its submission can
/// be failed instead of staying in progress.
pub struct DispatchError {
    pub command: BackendCommand,
    pub reason: String,
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(command)) => {
            *status = "UI command queue is full; please retry".to_string();
            Err(DispatchError {
                command,
                reason: status.clone(),
            })
        }
        Err(TrySendError::Disconnected(command)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            Err(DispatchError {
                command,
                reason: status.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn queues_command_when_worker_is_listening() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, BackendCommand::CheckHealth, &mut status).is_ok());
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::CheckHealth)));
        assert!(status.is_empty());
    }

    #[test]
    fn hands_back_command_when_worker_is_gone() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        let err = dispatch_backend_command(&tx, BackendCommand::CheckHealth, &mut status)
            .err()
            .expect("must fail");
        assert!(matches!(err.command, BackendCommand::CheckHealth));
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::CheckHealth, &mut status)
            .ok()
            .expect("first fits");
        let err = dispatch_backend_command(&tx, BackendCommand::CheckHealth, &mut status)
            .err()
            .expect("second overflows");
        assert_eq!(err.reason, "UI command queue is full; please retry");
    }
}
