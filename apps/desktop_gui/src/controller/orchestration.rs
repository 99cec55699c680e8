//! Command orchestration from controller effects to the bridge command queue.

use std::time::Duration;

use client_core::CommandSink;
use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::OutboundCommand;

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command was queued. Failures are logged, never surfaced.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "bridge command queue is full; dropping command");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(
                command = cmd_name,
                "bridge worker disconnected (possible startup/runtime failure)"
            );
            false
        }
    }
}

/// [`CommandSink`] backed by the bridge worker's queue.
#[derive(Clone)]
pub struct QueueSink {
    cmd_tx: Sender<BackendCommand>,
}

impl QueueSink {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }

    pub fn request_icon(&self, source: impl Into<String>) -> bool {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadIcon {
                source: source.into(),
            },
        )
    }
}

impl CommandSink for QueueSink {
    fn send(&mut self, command: OutboundCommand) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Deliver(command));
    }

    fn send_after(&mut self, command: OutboundCommand, delay: Duration) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::DeliverAfter { command, delay });
    }
}
