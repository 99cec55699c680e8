mod backend_bridge;
mod config;
mod controller;
mod effects;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::MessageClient;
use crossbeam_channel::bounded;
use eframe::egui;
use storage::{FileStore, MemoryStore};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::BridgeConfig};
use crate::config::Settings;
use crate::controller::{events::UiEvent, orchestration::QueueSink};
use crate::ui::{app::PanelStore, SettingsApp};

#[derive(Debug, Parser)]
#[command(name = "openbongo-settings", version, about = "OpenBongo settings panel")]
struct Args {
    /// Base URL of the OpenBongo backend.
    #[arg(long)]
    backend_url: Option<String>,
    /// Preference file (JSON string map).
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Directory that relative icon paths resolve against.
    #[arg(long)]
    asset_root: Option<PathBuf>,
    /// Config file; defaults to ./openbongo.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Do not read backend messages from stdin.
    #[arg(long)]
    no_stdin: bool,
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.backend_url {
            settings.backend_url = url;
        }
        if let Some(path) = self.preferences {
            settings.preferences_path = path;
        }
        if let Some(root) = self.asset_root {
            settings.asset_root = root;
        }
        if self.no_stdin {
            settings.stdin_intake = false;
        }
        if let Some(filter) = self.log_filter {
            settings.log_filter = filter;
        }
    }
}

fn open_store(settings: &Settings) -> PanelStore {
    match FileStore::open(&settings.preferences_path) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "preferences loaded");
            Box::new(store) as PanelStore
        }
        Err(err) => {
            tracing::warn!("preferences unavailable, changes will not be kept: {err}");
            Box::new(MemoryStore::new()) as PanelStore
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = config::load_settings(args.config.as_deref());
    let mut settings = loaded.settings.clone();
    args.apply(&mut settings);

    // stdout/stdin carry backend messages, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    loaded.log_warnings();

    let client = MessageClient::new(&settings.backend_url)
        .with_context(|| format!("invalid backend url '{}'", settings.backend_url))?;
    tracing::info!(endpoint = %client.endpoint(), "settings panel starting");

    let store = open_store(&settings);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(
        BridgeConfig {
            client,
            asset_root: settings.asset_root.clone(),
            stdin_intake: settings.stdin_intake,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OpenBongo Settings")
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([380.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "OpenBongo Settings",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SettingsApp::new(
                store,
                QueueSink::new(cmd_tx),
                ui_rx,
            )))
        }),
    )
    .map_err(|err| anyhow!("settings window failed: {err}"))
}
