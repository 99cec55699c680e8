//! Commands queued from the UI thread to the bridge worker.

use std::time::Duration;

use shared::protocol::OutboundCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Deliver(OutboundCommand),
    DeliverAfter {
        command: OutboundCommand,
        delay: Duration,
    },
    LoadIcon {
        source: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Deliver(command) => command.name(),
            BackendCommand::DeliverAfter { command, .. } => command.name(),
            BackendCommand::LoadIcon { .. } => "load_icon",
        }
    }
}
