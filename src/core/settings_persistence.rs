//! Settings persistence
//!
//! Saves and loads [`ClientSettings`] to/from a JSON file in the user's
//! configuration directory. The file also carries the persistent client
//! identity sent to the server with `Identify`.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings (with a fresh identity)
//! - Save failures are returned to the caller, which decides whether to care

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::CoreResult;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "Uuid::new_v4")]
    pub client_id: Uuid,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            client_id: Uuid::new_v4(),
        }
    }
}

impl ClientSettings {
    /// Replace the client identity with a fresh one
    pub fn reset_client_id(&mut self) {
        self.client_id = Uuid::new_v4();
        info!("[SETTINGS] New client id {}", self.client_id);
    }
}

/// Resolve the settings file path
///
/// Returns `settings.json` in the platform configuration directory, or in
/// the current directory if none can be determined.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "boardlink", "boardlink") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`, falling back to defaults
pub fn load_settings(path: &Path) -> ClientSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return ClientSettings::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<ClientSettings>(&contents) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                ClientSettings::default()
            }
        },
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.",
                path, e
            );
            ClientSettings::default()
        }
    }
}

/// Write settings to `path`, creating parent directories as needed
pub fn save_settings(path: &Path, settings: &ClientSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}

/// Load settings, persisting them first if the file did not exist yet
///
/// This pins the generated client identity on first run.
pub fn load_or_init_settings(path: &Path) -> CoreResult<ClientSettings> {
    let existed = path.exists();
    let settings = load_settings(path);
    if !existed {
        save_settings(path, &settings)?;
    }
    Ok(settings)
}
