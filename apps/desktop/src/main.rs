use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{DeliveryReport, MessageClient};
use serde_json::{Map, Value};
use shared::{
    color::Rgb,
    protocol::{InboundMessage, OutboundCommand, RawMessage, DEFAULT_BACKEND_URL},
};
use storage::{
    parse_size_scoped_key, FileStore, KeyValueStore, PreferenceValue, ACCENT_COLOR,
    ANIMATION_VERTICAL_OFFSET, CAT_FLIP, CAT_SIZE, DARK_MODE, LEFT_ARM_OFFSET, PARTICLE_DENSITY,
    PARTICLE_EFFECTS, RIGHT_ARM_OFFSET, SFX_VOLUME, UI_HORIZONTAL_OFFSET, UI_OFFSET,
};

#[derive(Parser, Debug)]
#[command(name = "bongoctl", version, about = "Poke an OpenBongo backend and its panel preferences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send one control message, e.g. `send setCatSize --field size=125`.
    Send {
        #[arg(long, env = "OPENBONGO_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
        backend_url: String,
        /// Message type as it appears on the wire.
        kind: String,
        /// `key=value`; values that parse as JSON keep their JSON type.
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Inspect or edit the panel's preference file.
    Prefs {
        #[arg(long, env = "OPENBONGO_PREFERENCES")]
        file: Option<PathBuf>,
        #[command(subcommand)]
        command: PrefsCommand,
    },
    /// Parse an inbound backend message and report how the panel would treat it.
    Check { json: String },
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    List,
    Get { key: String },
    Set { key: String, value: String },
    Remove { key: String },
}

fn default_preferences_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("openbongo")
        .join("preferences.json")
}

/// Builds `{"type": kind, ...fields}` and checks it against the known commands.
fn build_command(kind: &str, fields: &[String]) -> Result<OutboundCommand> {
    let mut object = Map::new();
    object.insert("type".into(), Value::String(kind.to_string()));
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("field '{field}' is not key=value"))?;
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.into()));
        object.insert(key.to_string(), value);
    }
    serde_json::from_value(Value::Object(object))
        .with_context(|| format!("'{kind}' is not a valid command with the given fields"))
}

async fn send(backend_url: &str, command: &OutboundCommand) -> Result<DeliveryReport> {
    let client = MessageClient::new(backend_url)?;
    tracing::debug!(endpoint = %client.endpoint(), command = command.name(), "sending");
    Ok(client.send(command).await?)
}

/// Rejects values the panel would ignore when reading the file back.
fn check_preference(key: &str, value: &str) -> Result<()> {
    let valid = if [DARK_MODE.key, CAT_FLIP.key, PARTICLE_EFFECTS.key].contains(&key) {
        bool::decode(value).is_some()
    } else if [CAT_SIZE.key, SFX_VOLUME.key, PARTICLE_DENSITY.key].contains(&key) {
        u32::decode(value).is_some()
    } else if [UI_OFFSET.key, UI_HORIZONTAL_OFFSET.key].contains(&key) {
        i32::decode(value).is_some()
    } else if key == ACCENT_COLOR.key {
        Rgb::from_hex(value).is_some()
    } else if [LEFT_ARM_OFFSET.key, RIGHT_ARM_OFFSET.key, ANIMATION_VERTICAL_OFFSET.key]
        .contains(&key)
        || parse_size_scoped_key(key).is_some()
    {
        f64::decode(value).is_some()
    } else {
        bail!("unknown preference key '{key}'");
    };
    if !valid {
        bail!("'{value}' is not a valid value for {key}");
    }
    Ok(())
}

fn run_prefs(path: &Path, command: PrefsCommand, out: &mut impl std::io::Write) -> Result<()> {
    let mut store = FileStore::open(path)?;
    match command {
        PrefsCommand::List => {
            let mut keys = store.keys()?;
            keys.sort();
            for key in keys {
                let value = store.get_item(&key)?.unwrap_or_default();
                writeln!(out, "{key}={value}")?;
            }
        }
        PrefsCommand::Get { key } => match store.get_item(&key)? {
            Some(value) => writeln!(out, "{value}")?,
            None => bail!("'{key}' is not set"),
        },
        PrefsCommand::Set { key, value } => {
            check_preference(&key, &value)?;
            store.set_item(&key, &value)?;
            writeln!(out, "{key}={value}")?;
        }
        PrefsCommand::Remove { key } => {
            store.remove_item(&key)?;
            writeln!(out, "removed {key}")?;
        }
    }
    Ok(())
}

fn check_message(json: &str) -> Result<InboundMessage> {
    InboundMessage::parse(RawMessage::from(json)).map_err(|err| anyhow!("dropped: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            backend_url,
            kind,
            fields,
        } => {
            let command = build_command(&kind, &fields)?;
            let report = send(&backend_url, &command).await?;
            println!("{} -> {} {}", report.command, report.status, report.body);
        }
        Commands::Prefs { file, command } => {
            let path = file.unwrap_or_else(default_preferences_file);
            run_prefs(&path, command, &mut std::io::stdout())?;
        }
        Commands::Check { json } => {
            let message = check_message(&json)?;
            println!("{}: {message:?}", message.kind());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
