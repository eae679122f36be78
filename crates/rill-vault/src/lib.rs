// Filesystem vault: implements rill_core::Vault over std::fs with change
// watching via notify.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rill_core::{path as vpath, Vault, VaultError, VaultItem};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;
use unicode_normalization::UnicodeNormalization;

mod tests;

/// Trashed items are moved here rather than deleted outright.
const TRASH_DIR: &str = ".trash";

/// Reads a directory and returns sorted VaultItems.
/// Folders come first, then files, each group sorted alphabetically
/// (case-insensitive). Permission errors and unreadable entries are
/// silently skipped. Symlinks are followed.
fn read_directory(abs: &Path, rel_prefix: &str) -> Vec<VaultItem> {
    let read_dir = match std::fs::read_dir(abs) {
        Ok(rd) => rd,
        Err(_) => return Vec::new(),
    };

    let mut items: Vec<VaultItem> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let metadata = std::fs::metadata(entry.path())
                .or_else(|_| entry.metadata())
                .ok()?;
            let name: String = entry.file_name().into_string().ok()?.nfc().collect();
            let is_dir = metadata.is_dir();
            let extension = if is_dir {
                None
            } else {
                name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
            };
            Some(VaultItem {
                path: vpath::join(rel_prefix, &name),
                name,
                is_dir,
                extension,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.is_dir.cmp(&a.is_dir).then_with(|| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        })
    });

    items
}

/// A vault rooted at a real directory. Paths on the API are vault-relative
/// `/`-separated strings (root = `"/"`); they never escape the root.
pub struct FsVault {
    root: PathBuf,
    watcher: Option<RecommendedWatcher>,
    event_rx: Option<mpsc::Receiver<notify::Result<notify::Event>>>,
    last_event_time: Option<Instant>,
    active_file: Option<String>,
}

impl FsVault {
    pub fn new(root: PathBuf) -> Self {
        let mut vault = FsVault {
            root,
            watcher: None,
            event_rx: None,
            last_event_time: None,
            active_file: None,
        };
        vault.start_watcher();
        vault
    }

    /// Open without a watcher (tests, one-shot tooling).
    pub fn unwatched(root: PathBuf) -> Self {
        FsVault {
            root,
            watcher: None,
            event_rx: None,
            last_event_time: None,
            active_file: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tell the vault which file the host editor has focused.
    pub fn set_active_file(&mut self, path: Option<String>) {
        self.active_file = path;
    }

    fn abs(&self, rel: &str) -> PathBuf {
        if rel == "/" || rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// Start (or restart) the filesystem watcher on the vault root.
    fn start_watcher(&mut self) {
        let (tx, rx) = mpsc::channel();

        match notify::recommended_watcher(tx) {
            Ok(mut w) => {
                // Ignore watch errors (e.g. root doesn't exist yet).
                let _ = w.watch(&self.root, RecursiveMode::Recursive);
                self.watcher = Some(w);
                self.event_rx = Some(rx);
            }
            Err(e) => {
                log::warn!("Failed to start vault watcher: {e}");
                self.watcher = None;
                self.event_rx = None;
            }
        }
    }

    /// Call periodically to drain pending filesystem events. Returns true
    /// when the panel should refresh. Events are debounced: changes within
    /// 100ms of the last processed batch are ignored until 100ms has
    /// elapsed, at which point a single refresh is signalled.
    pub fn poll_events(&mut self) -> bool {
        let rx = match self.event_rx.as_ref() {
            Some(rx) => rx,
            None => return false,
        };

        let mut has_relevant_event = false;
        while let Ok(event_result) = rx.try_recv() {
            if event_result.is_ok() {
                has_relevant_event = true;
            }
        }

        if !has_relevant_event {
            return false;
        }

        let now = Instant::now();
        if let Some(last) = self.last_event_time {
            if now.duration_since(last).as_millis() < 100 {
                return false;
            }
        }

        self.last_event_time = Some(now);
        true
    }
}

impl Vault for FsVault {
    fn list_children(&self, folder: &str) -> Vec<VaultItem> {
        let rel = vpath::normalize(folder);
        let prefix = if rel == "/" { "" } else { &rel };
        read_directory(&self.abs(&rel), prefix)
    }

    fn exists(&self, path: &str) -> bool {
        path == "/" || self.abs(path).exists()
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        Ok(std::fs::read_to_string(self.abs(path))?)
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.abs(path);
        if let Some(parent) = abs.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(abs, content)?)
    }

    fn create_file(&mut self, path: &str, content: &str) -> Result<(), VaultError> {
        if self.exists(path) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        self.write(path, content)
    }

    fn create_folder(&mut self, path: &str) -> Result<(), VaultError> {
        if self.exists(path) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        Ok(std::fs::create_dir_all(self.abs(path))?)
    }

    fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), VaultError> {
        if !self.exists(old_path) {
            return Err(VaultError::NotFound(old_path.to_string()));
        }
        if self.exists(new_path) {
            return Err(VaultError::AlreadyExists(new_path.to_string()));
        }
        if vpath::is_descendant(new_path, old_path) {
            return Err(VaultError::InvalidTarget(new_path.to_string()));
        }
        let abs_new = self.abs(new_path);
        if let Some(parent) = abs_new.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::rename(self.abs(old_path), abs_new)?)
    }

    fn trash(&mut self, path: &str) -> Result<(), VaultError> {
        if path == "/" {
            return Err(VaultError::InvalidTarget(path.to_string()));
        }
        if !self.exists(path) {
            return Err(VaultError::NotFound(path.to_string()));
        }
        std::fs::create_dir_all(self.root.join(TRASH_DIR))?;

        // Keep the leaf name; suffix with a counter on collision.
        let leaf = vpath::leaf_name(path);
        let mut target = self.root.join(TRASH_DIR).join(&leaf);
        let mut counter = 1;
        while target.exists() {
            target = self.root.join(TRASH_DIR).join(format!("{leaf} ({counter})"));
            counter += 1;
        }
        Ok(std::fs::rename(self.abs(path), target)?)
    }

    fn active_file(&self) -> Option<String> {
        self.active_file.clone()
    }

    fn display_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Vault".to_string())
    }
}
