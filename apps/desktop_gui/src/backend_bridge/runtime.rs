//! Runtime bridge between the UI command queue and backend event intake.

use std::{path::PathBuf, thread};

use client_core::{MessageClient, TransportError};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::protocol::{OutboundCommand, RawMessage};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::backend_bridge::{commands::BackendCommand, icons};
use crate::controller::events::UiEvent;

pub struct BridgeConfig {
    pub client: MessageClient,
    pub asset_root: PathBuf,
    pub stdin_intake: bool,
}

pub fn launch(config: BridgeConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BridgeFailed(format!(
                    "failed to build bridge runtime: {err}"
                )));
                tracing::error!("failed to build bridge runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let BridgeConfig {
                client,
                asset_root,
                stdin_intake,
            } = config;
            let http = reqwest::Client::new();
            tracing::info!(endpoint = %client.endpoint(), "bridge worker ready");

            if stdin_intake {
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let forwarded = read_inbound_lines(tokio::io::stdin(), ui_tx).await;
                    tracing::info!(forwarded, "stdin message intake closed");
                });
            }

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Deliver(command) => {
                        let client = client.clone();
                        tokio::spawn(async move { deliver(&client, command).await });
                    }
                    BackendCommand::DeliverAfter { command, delay } => {
                        let client = client.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            deliver(&client, command).await;
                        });
                    }
                    BackendCommand::LoadIcon { source } => {
                        let http = http.clone();
                        let asset_root = asset_root.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match icons::load_icon(&http, &asset_root, &source).await
                            {
                                Ok(icon) => UiEvent::IconLoaded(icon),
                                Err(err) => {
                                    tracing::debug!(source = %source, "icon unavailable: {err:#}");
                                    UiEvent::IconFailed {
                                        source,
                                        reason: format!("{err:#}"),
                                    }
                                }
                            };
                            forward_icon_event(&ui_tx, event);
                        });
                    }
                }
            }
            tracing::info!("ui command queue closed; bridge worker stopping");
        });
    });
}

/// Fire-and-forget delivery: the outcome is only logged.
pub async fn deliver(client: &MessageClient, command: OutboundCommand) {
    match client.send(&command).await {
        Ok(report) => tracing::debug!(
            command = report.command,
            status = report.status,
            body = %report.body,
            "backend accepted command"
        ),
        Err(err @ TransportError::Status { .. }) => {
            tracing::warn!("backend rejected command: {err}");
        }
        Err(err) => tracing::error!(command = command.name(), "failed to reach backend: {err}"),
    }
}

/// Returns whether the icon result reached the UI. A dropped result is retried
/// by the UI once its pending slot goes stale.
pub fn forward_icon_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let source = match &event {
        UiEvent::IconLoaded(icon) => icon.source.clone(),
        UiEvent::IconFailed { source, .. } => source.clone(),
        _ => String::new(),
    };
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(source = %source, "ui event queue is full; dropping icon result");
            false
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

/// Forwards each non-empty line as an inbound message. Returns how many were forwarded.
pub async fn read_inbound_lines<R>(reader: R, ui_tx: Sender<UiEvent>) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut forwarded = 0;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!("failed to read inbound message line: {err}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match ui_tx.try_send(UiEvent::Inbound(RawMessage::from(line))) {
            Ok(()) => forwarded += 1,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping inbound message");
            }
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
    forwarded
}
