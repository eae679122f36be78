use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod path;

// ──────────────────────────────────────────────
// Items
// ──────────────────────────────────────────────

/// What a single pane entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Folder,
    File,
    Virtual,
    Divider,
}

/// Non-filesystem entries rendered in the root column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualKind {
    Recent,
    Tags,
    Shortcuts,
}

/// One renderable entry in a column's item list.
/// Plain data: the presentation adapter owns everything visual.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneItem {
    pub id: String,
    pub kind: ItemKind,
    pub name: String,
    pub path: String,
    /// Indent depth within the column (0 = top of the column).
    pub level: usize,
    pub is_marked: bool,
    pub has_children: bool,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub virtual_kind: Option<VirtualKind>,
    pub note_count: Option<usize>,
    /// Uppercase extension label, only set for unknown file types.
    pub extension: Option<String>,
}

impl PaneItem {
    pub fn folder(path: &str, name: &str, level: usize) -> Self {
        Self {
            id: format!("folder-{path}"),
            kind: ItemKind::Folder,
            name: name.to_string(),
            path: path.to_string(),
            level,
            is_marked: false,
            has_children: false,
            icon: None,
            color: None,
            virtual_kind: None,
            note_count: None,
            extension: None,
        }
    }

    pub fn file(path: &str, name: &str, level: usize) -> Self {
        Self {
            id: format!("file-{path}"),
            kind: ItemKind::File,
            ..Self::folder(path, name, level)
        }
    }
}

// ──────────────────────────────────────────────
// Folder metadata & shortcuts
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Name,
    Created,
    Modified,
    Custom,
}

/// Per-marked-folder decoration stored in folders.json.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_divider_below: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_notes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    File,
    Folder,
    Tag,
    Search,
}

/// A pinned entry in the Shortcuts virtual section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShortcutKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub sort_index: usize,
}

// ──────────────────────────────────────────────
// Marked folder queries
// ──────────────────────────────────────────────

/// Read-only view of the marked-folder set. The membership store implements
/// this; tests can use a plain `HashSet<String>`.
pub trait MarkedFolders {
    fn is_marked(&self, path: &str) -> bool;
    fn marked_paths(&self) -> Vec<String>;
}

impl MarkedFolders for HashSet<String> {
    fn is_marked(&self, path: &str) -> bool {
        self.contains(path)
    }

    fn marked_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.iter().cloned().collect();
        paths.sort();
        paths
    }
}

// ──────────────────────────────────────────────
// Vault collaborator
// ──────────────────────────────────────────────

/// A folder or file as reported by the vault.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultItem {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    /// Lowercase extension for files, `None` for folders.
    pub extension: Option<String>,
}

#[derive(Debug)]
pub enum VaultError {
    Io(std::io::Error),
    NotFound(String),
    AlreadyExists(String),
    /// Move/rename target is illegal (e.g. a folder into its own subtree).
    InvalidTarget(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Io(e) => write!(f, "vault i/o error: {e}"),
            VaultError::NotFound(p) => write!(f, "path not found: {p}"),
            VaultError::AlreadyExists(p) => write!(f, "path already exists: {p}"),
            VaultError::InvalidTarget(p) => write!(f, "invalid target: {p}"),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(e: std::io::Error) -> Self {
        VaultError::Io(e)
    }
}

/// The host file store the navigator talks to. Paths are vault-relative
/// strings; the root is the sentinel `"/"`.
///
/// Listing a missing folder yields an empty list rather than an error;
/// mutations are fallible and leave the vault untouched on failure.
pub trait Vault {
    fn list_children(&self, folder: &str) -> Vec<VaultItem>;
    fn exists(&self, path: &str) -> bool;
    fn read(&self, path: &str) -> Result<String, VaultError>;
    fn write(&mut self, path: &str, content: &str) -> Result<(), VaultError>;
    fn create_file(&mut self, path: &str, content: &str) -> Result<(), VaultError>;
    fn create_folder(&mut self, path: &str) -> Result<(), VaultError>;
    fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), VaultError>;
    fn trash(&mut self, path: &str) -> Result<(), VaultError>;
    /// The file currently open in the host editor, if any.
    fn active_file(&self) -> Option<String> {
        None
    }
    /// Display name for the vault root entry.
    fn display_name(&self) -> String {
        "Vault".to_string()
    }
}
