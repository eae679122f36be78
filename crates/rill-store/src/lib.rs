// Marked-folder membership store: in-memory caches over three JSON
// documents, with debounced writes and rename/delete cascades.

mod debounce;
mod documents;
mod tests;

pub use debounce::{DocKind, SaveScheduler, SAVE_DEBOUNCE};
pub use documents::{FoldersDoc, ShortcutsDoc, UiState};

use rill_core::{path, FolderMetadata, MarkedFolders, Shortcut};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Local data directory: `<config_dir>/rill/data`.
pub fn default_data_dir() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("rill").join("data"))
}

/// Holds the marked-folder set, per-folder metadata, shortcuts, and UI
/// layout state. The in-memory caches are authoritative; disk writes are
/// debounced and best-effort (a failed write is logged, never retried, and
/// the next mutation schedules a fresh attempt).
pub struct FolderStore {
    data_dir: PathBuf,
    folders: FoldersDoc,
    shortcuts: ShortcutsDoc,
    ui_state: UiState,
    scheduler: SaveScheduler,
}

impl FolderStore {
    /// Load from the platform config directory, falling back to defaults on
    /// any read or parse failure.
    pub fn open() -> Self {
        let data_dir = default_data_dir().unwrap_or_else(|| {
            log::warn!("Could not determine config directory, using ./rill-data");
            PathBuf::from("rill-data")
        });
        Self::load_from(data_dir)
    }

    pub fn load_from(data_dir: PathBuf) -> Self {
        let folders = load_doc(&data_dir, DocKind::Folders);
        let shortcuts = load_doc(&data_dir, DocKind::Shortcuts);
        let ui_state = load_doc(&data_dir, DocKind::UiState);
        Self {
            data_dir,
            folders,
            shortcuts,
            ui_state,
            scheduler: SaveScheduler::new(),
        }
    }

    // ── Marked folders ──

    pub fn marked_folders(&self) -> &[String] {
        &self.folders.marked_folders
    }

    /// Idempotent add.
    pub fn mark(&mut self, folder_path: &str) {
        let normalized = path::normalize(folder_path);
        if !self.folders.marked_folders.contains(&normalized) {
            self.folders.marked_folders.push(normalized);
            self.queue_save(DocKind::Folders);
        }
    }

    /// Remove a marked folder and its metadata. No-op if absent.
    pub fn unmark(&mut self, folder_path: &str) {
        let before = self.folders.marked_folders.len();
        self.folders.marked_folders.retain(|p| p != folder_path);
        if self.folders.marked_folders.len() != before {
            self.folders.metadata.remove(folder_path);
            self.queue_save(DocKind::Folders);
        }
    }

    pub fn metadata(&self, folder_path: &str) -> Option<&FolderMetadata> {
        self.folders.metadata.get(folder_path)
    }

    pub fn set_metadata(&mut self, folder_path: &str, metadata: FolderMetadata) {
        self.folders
            .metadata
            .insert(folder_path.to_string(), metadata);
        self.queue_save(DocKind::Folders);
    }

    /// Marked paths that do not exist in the vault anymore. Pure query; the
    /// caller decides whether to prune.
    pub fn validate(&self, existing: &HashSet<String>) -> Vec<String> {
        self.folders
            .marked_folders
            .iter()
            .filter(|p| !existing.contains(*p))
            .cloned()
            .collect()
    }

    // ── External rename / delete cascades ──

    /// Rewrite every marked path, metadata key, and shortcut path that is
    /// `old_path` or sits below it. Ordering is preserved and rewrites that
    /// would collide with an existing entry are dropped instead of
    /// duplicated.
    pub fn on_external_rename(&mut self, old_path: &str, new_path: &str) {
        let rewrite = |p: &str| -> Option<String> {
            if p == old_path {
                Some(new_path.to_string())
            } else if path::is_descendant(p, old_path) {
                Some(format!("{new_path}{}", &p[old_path.len()..]))
            } else {
                None
            }
        };

        let mut seen = HashSet::new();
        let mut rewritten = Vec::with_capacity(self.folders.marked_folders.len());
        for p in &self.folders.marked_folders {
            let next = rewrite(p).unwrap_or_else(|| p.clone());
            if seen.insert(next.clone()) {
                rewritten.push(next);
            }
        }
        self.folders.marked_folders = rewritten;

        let metadata = std::mem::take(&mut self.folders.metadata);
        for (key, meta) in metadata {
            let next = rewrite(&key).unwrap_or(key);
            self.folders.metadata.entry(next).or_insert(meta);
        }

        for shortcut in &mut self.shortcuts.items {
            if let Some(next) = rewrite(&shortcut.path) {
                shortcut.path = next;
            }
        }

        self.queue_save(DocKind::Folders);
        self.queue_save(DocKind::Shortcuts);
    }

    /// Drop every marked path, metadata entry, and shortcut at or below the
    /// deleted path.
    pub fn on_external_delete(&mut self, deleted_path: &str) {
        let is_gone = |p: &str| p == deleted_path || path::is_descendant(p, deleted_path);

        self.folders.marked_folders.retain(|p| !is_gone(p));
        self.folders.metadata.retain(|p, _| !is_gone(p));
        self.shortcuts.items.retain(|s| !is_gone(&s.path));

        self.queue_save(DocKind::Folders);
        self.queue_save(DocKind::Shortcuts);
    }

    // ── Shortcuts ──

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts.items
    }

    pub fn add_shortcut(&mut self, shortcut: Shortcut) {
        self.shortcuts.items.push(shortcut);
        self.queue_save(DocKind::Shortcuts);
    }

    pub fn remove_shortcut(&mut self, id: &str) {
        let before = self.shortcuts.items.len();
        self.shortcuts.items.retain(|s| s.id != id);
        if self.shortcuts.items.len() != before {
            self.queue_save(DocKind::Shortcuts);
        }
    }

    // ── UI state ──

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn update_ui_state(&mut self, update: impl FnOnce(&mut UiState)) {
        update(&mut self.ui_state);
        self.queue_save(DocKind::UiState);
    }

    // ── Persistence ──

    fn queue_save(&mut self, kind: DocKind) {
        self.scheduler.mark_dirty(kind, Instant::now());
    }

    /// Write any document whose debounce deadline has passed. Call this from
    /// the host's idle/update loop. Returns true if anything was written.
    pub fn poll_saves(&mut self) -> bool {
        let due = self.scheduler.take_due(Instant::now());
        for kind in &due {
            self.write_doc(*kind);
        }
        !due.is_empty()
    }

    /// Synchronously write everything still pending. Call before shutdown so
    /// the last edit is not lost to an unexpired debounce timer.
    pub fn flush_all(&mut self) {
        for kind in self.scheduler.take_all() {
            self.write_doc(kind);
        }
    }

    pub fn has_pending_saves(&self) -> bool {
        self.scheduler.is_pending(DocKind::Folders)
            || self.scheduler.is_pending(DocKind::Shortcuts)
            || self.scheduler.is_pending(DocKind::UiState)
    }

    fn write_doc(&self, kind: DocKind) {
        match kind {
            DocKind::Folders => save_doc(&self.data_dir, kind, &self.folders),
            DocKind::Shortcuts => save_doc(&self.data_dir, kind, &self.shortcuts),
            DocKind::UiState => save_doc(&self.data_dir, kind, &self.ui_state),
        }
    }
}

impl MarkedFolders for FolderStore {
    fn is_marked(&self, folder_path: &str) -> bool {
        self.folders.marked_folders.iter().any(|p| p == folder_path)
    }

    fn marked_paths(&self) -> Vec<String> {
        self.folders.marked_folders.clone()
    }
}

// ──────────────────────────────────────────────
// Document file I/O
// ──────────────────────────────────────────────

fn load_doc<T: DeserializeOwned + Default>(data_dir: &Path, kind: DocKind) -> T {
    let path = data_dir.join(kind.file_name());
    match std::fs::read_to_string(&path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

fn save_doc<T: Serialize>(data_dir: &Path, kind: DocKind, doc: &T) {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        log::error!("Failed to create data dir {}: {}", data_dir.display(), e);
        return;
    }
    let path = data_dir.join(kind.file_name());
    match serde_json::to_string_pretty(doc) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize {}: {}", kind.file_name(), e);
        }
    }
}
