// Settings persistence: global panel configuration stored separately from
// UI state. Uses the platform-native config dir, e.g.
// ~/.config/rill/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSettings {
    #[serde(default = "default_version")]
    pub version: String,
    /// Horizontal nesting depth cutoff, 1-4.
    #[serde(default = "default_max_levels")]
    pub max_levels: u8,

    // Display
    #[serde(default = "default_true")]
    pub show_recent_notes: bool,
    #[serde(default = "default_true")]
    pub show_tags: bool,
    #[serde(default = "default_true")]
    pub show_shortcuts: bool,
    #[serde(default = "default_true")]
    pub show_note_count: bool,
    #[serde(default = "default_true")]
    pub show_icons: bool,

    // Behavior
    #[serde(default = "default_true")]
    pub confirm_before_delete: bool,
    #[serde(default)]
    pub auto_reveal_active_note: bool,

    // Filters applied before item-list construction
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    #[serde(default)]
    pub ignored_extensions: Vec<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_max_levels() -> u8 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_levels: default_max_levels(),
            show_recent_notes: true,
            show_tags: true,
            show_shortcuts: true,
            show_note_count: true,
            show_icons: true,
            confirm_before_delete: true,
            auto_reveal_active_note: false,
            excluded_folders: Vec::new(),
            ignored_extensions: Vec::new(),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("rill").join("settings.json"))
}

pub fn load_settings() -> NavSettings {
    let path = match settings_path() {
        Some(p) => p,
        None => return NavSettings::default(),
    };

    match std::fs::read_to_string(&path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                NavSettings::default()
            }
        },
        Err(_) => NavSettings::default(),
    }
}

pub fn save_settings(settings: &NavSettings) {
    let path = match settings_path() {
        Some(p) => p,
        None => {
            log::warn!("Cannot determine settings path");
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
