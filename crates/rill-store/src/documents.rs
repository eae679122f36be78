// Persisted document shapes. Field names on the wire are camelCase and every
// field defaults, so older or partial files still load.

use rill_core::{FolderMetadata, Shortcut};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_version() -> String {
    "1.0.0".to_string()
}

/// folders.json: the marked-folder set plus per-folder metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldersDoc {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub marked_folders: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, FolderMetadata>,
}

impl Default for FoldersDoc {
    fn default() -> Self {
        Self {
            version: default_version(),
            marked_folders: Vec::new(),
            metadata: HashMap::new(),
        }
    }
}

/// shortcuts.json: pinned entries shown in the Shortcuts virtual section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutsDoc {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub items: Vec<Shortcut>,
}

impl Default for ShortcutsDoc {
    fn default() -> Self {
        Self {
            version: default_version(),
            items: Vec::new(),
        }
    }
}

/// state.json: local UI layout, not meant to sync across machines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_pane_widths")]
    pub pane_widths: Vec<f32>,
    /// Inline expansions per column index.
    #[serde(default)]
    pub expanded_folders: HashMap<usize, Vec<String>>,
    #[serde(default)]
    pub selected_path: Vec<String>,
    #[serde(default)]
    pub scroll_positions: HashMap<usize, f32>,
    #[serde(default)]
    pub active_level: i32,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub collapsed_to_level: i32,
}

fn default_pane_widths() -> Vec<f32> {
    vec![200.0; 4]
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            version: default_version(),
            pane_widths: default_pane_widths(),
            expanded_folders: HashMap::new(),
            selected_path: Vec::new(),
            scroll_positions: HashMap::new(),
            active_level: 0,
            is_collapsed: false,
            collapsed_to_level: 0,
        }
    }
}
