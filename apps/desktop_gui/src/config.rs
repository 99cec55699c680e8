use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use shared::protocol::DEFAULT_BACKEND_URL;

pub const CONFIG_FILE_NAME: &str = "openbongo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub preferences_path: PathBuf,
    pub asset_root: PathBuf,
    pub log_filter: String,
    pub stdin_intake: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            preferences_path: default_preferences_path(),
            asset_root: PathBuf::from("."),
            log_filter: "info".into(),
            stdin_intake: true,
        }
    }
}

pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("openbongo")
        .join("preferences.json")
}

/// Settings plus the problems met while loading them. Loading runs before the
/// log subscriber exists, so warnings are held until [`Self::log_warnings`].
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

impl LoadedSettings {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}

/// Defaults, then the config file, then environment overrides.
pub fn load_settings(config_path: Option<&Path>) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));

    match fs::read_to_string(path) {
        Ok(raw) => {
            if let Err(warning) = apply_file(&mut settings, &raw) {
                warnings.push(format!("{}: {warning}", path.display()));
            }
        }
        Err(err) if config_path.is_some() => {
            warnings.push(format!("failed to read config file {}: {err}", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    LoadedSettings { settings, warnings }
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<(), String> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
        .map_err(|err| format!("ignoring config file that is not a flat string table: {err}"))?;
    if let Some(v) = file_cfg.get("backend_url") {
        settings.backend_url = v.clone();
    }
    if let Some(v) = file_cfg.get("preferences_path") {
        settings.preferences_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("asset_root") {
        settings.asset_root = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    if let Some(v) = file_cfg.get("stdin_intake").and_then(|v| parse_flag(v)) {
        settings.stdin_intake = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("OPENBONGO_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = var("OPENBONGO_PREFERENCES") {
        settings.preferences_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__PREFERENCES_PATH") {
        settings.preferences_path = PathBuf::from(v);
    }

    if let Some(v) = var("OPENBONGO_ASSET_ROOT") {
        settings.asset_root = PathBuf::from(v);
    }
    if let Some(v) = var("APP__ASSET_ROOT") {
        settings.asset_root = PathBuf::from(v);
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = var("APP__STDIN_INTAKE") {
        if let Some(parsed) = parse_flag(&v) {
            settings.stdin_intake = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
