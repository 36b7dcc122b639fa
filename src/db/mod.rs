use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::toast::{DEFAULT_ALERT_DISMISS_DELAY_MS, DEFAULT_TOAST_DURATION_MS};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "streamify.player_settings";
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "player_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[cfg(target_arch = "wasm32")]
    #[error("local storage: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings encoding: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("no config directory on this platform")]
    NoConfigDir,
}

/// User preferences for the player widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,
    #[serde(default = "default_alert_dismiss_delay_ms")]
    pub alert_dismiss_delay_ms: u32,
    /// Origin of the Streamify API. Empty means same origin as the page.
    #[serde(default)]
    pub api_base_url: String,
}

fn default_volume() -> f64 {
    0.8
}

fn default_toast_duration_ms() -> u32 {
    DEFAULT_TOAST_DURATION_MS
}

fn default_alert_dismiss_delay_ms() -> u32 {
    DEFAULT_ALERT_DISMISS_DELAY_MS
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            repeat: false,
            toast_duration_ms: default_toast_duration_ms(),
            alert_dismiss_delay_ms: default_alert_dismiss_delay_ms(),
            api_base_url: String::new(),
        }
    }
}

impl PlayerSettings {
    /// Clamp values a hand-edited or older store may carry.
    pub fn normalized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            default_volume()
        };
        self.toast_duration_ms = self.toast_duration_ms.clamp(500, 60_000);
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn volume_percent(&self) -> f64 {
        (self.volume * 100.0).round()
    }
}

/// Load settings, falling back to defaults when missing or unreadable.
pub fn load_settings() -> PlayerSettings {
    match read_settings() {
        Ok(Some(settings)) => settings.normalized(),
        Ok(None) => PlayerSettings::default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read player settings, using defaults");
            PlayerSettings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_settings() -> Result<Option<PlayerSettings>, SettingsError> {
    match LocalStorage::get::<PlayerSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(Some(settings)),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &PlayerSettings) -> Result<(), SettingsError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<std::path::PathBuf, SettingsError> {
    let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    path.push("streamify");
    path.push(SETTINGS_FILE);
    Ok(path)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_settings() -> Result<Option<PlayerSettings>, SettingsError> {
    let path = settings_path()?;
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &PlayerSettings) -> Result<(), SettingsError> {
    let path = settings_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_vec_pretty(settings)?)?;
    Ok(())
}
