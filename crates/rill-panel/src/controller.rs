//! Orchestration layer: owns the vault handle, the membership store and the
//! navigation state machines, and answers "what happens when the user clicks
//! path P in column i". The presentation adapter calls in with plain events
//! and reads back [`ColumnView`] lists; it never touches the state machines
//! directly.

use std::collections::HashSet;

use rill_core::path;
use rill_core::{ItemKind, MarkedFolders, PaneItem, Shortcut, ShortcutKind, Vault};
use rill_nav::{Column, ColumnManager, LevelComputer, SelectionManager, SerializedColumn};
use rill_store::FolderStore;

use crate::drag::DragState;
use crate::events::{EventQueue, NavEvent};
use crate::fileops::{self, NewFileKind};
use crate::items::ItemDataProvider;
use crate::settings::{self, NavSettings};

/// One column ready for rendering: the item list plus the column's own
/// sub-state, flattened so the adapter needs no further queries.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub index: usize,
    pub folder_path: String,
    /// Header label: the vault's display name for the root column, the
    /// folder's leaf name otherwise.
    pub title: String,
    pub selected_item: Option<String>,
    pub is_collapsed: bool,
    pub width: f32,
    pub items: Vec<PaneItem>,
}

/// A delete request parked behind the confirmation dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub paths: Vec<String>,
}

pub struct NavPanel<V: Vault> {
    vault: V,
    store: FolderStore,
    columns: ColumnManager,
    selection: SelectionManager,
    levels: LevelComputer,
    settings: NavSettings,
    drag: DragState,
    events: EventQueue,
    pending_delete: Option<PendingDelete>,
    needs_render: bool,
}

impl<V: Vault> NavPanel<V> {
    pub fn new(vault: V) -> Self {
        let settings = settings::load_settings();
        let store = FolderStore::open();
        Self::assemble(vault, store, settings)
    }

    /// Build a panel over explicit collaborators instead of the on-disk
    /// defaults. Tests and embedders use this.
    pub fn with_parts(vault: V, store: FolderStore, settings: NavSettings) -> Self {
        Self::assemble(vault, store, settings)
    }

    fn assemble(vault: V, store: FolderStore, settings: NavSettings) -> Self {
        let levels = LevelComputer::new(settings.max_levels);
        let mut panel = Self {
            vault,
            store,
            columns: ColumnManager::new(),
            selection: SelectionManager::new(),
            levels,
            settings,
            drag: DragState::default(),
            events: EventQueue::new(),
            pending_delete: None,
            needs_render: true,
        };
        panel.restore_ui_state();
        panel
    }

    // ──────────────────────────────────────────────
    // Accessors
    // ──────────────────────────────────────────────

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    pub fn store(&self) -> &FolderStore {
        &self.store
    }

    pub fn columns(&self) -> &ColumnManager {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Remove and return everything queued for the host since the last drain.
    pub fn take_events(&mut self) -> Vec<NavEvent> {
        self.events.drain()
    }

    fn opens_horizontally(&self, folder_path: &str, column_index: usize) -> bool {
        self.store.is_marked(folder_path) && column_index < self.settings.max_levels as usize
    }

    // ──────────────────────────────────────────────
    // Click handling
    // ──────────────────────────────────────────────

    /// Plain click on an item. Collapses multi-selection, truncates stale
    /// columns to the right, then either opens the file, pushes a column, or
    /// toggles inline expansion.
    pub fn handle_item_click(&mut self, clicked_path: &str, kind: ItemKind, column_index: usize) {
        let clicked = path::normalize(clicked_path);
        self.selection.clear();
        self.columns.close_columns_to_right(column_index, &clicked);

        match kind {
            ItemKind::File => {
                self.selection.toggle(&clicked, false);
                self.events.push(NavEvent::OpenFile { path: clicked });
            }
            ItemKind::Folder => {
                self.selection.toggle(&clicked, false);
                if self.opens_horizontally(&clicked, column_index) {
                    self.columns.open_subfolder(&clicked, column_index);
                } else {
                    self.columns.toggle_expand(&clicked, column_index);
                }
                let level = self.levels.compute_level(&self.store, &clicked);
                self.events.push(NavEvent::FolderSelected {
                    path: clicked,
                    level,
                });
            }
            ItemKind::Virtual | ItemKind::Divider => {}
        }

        self.persist_ui_state();
        self.needs_render = true;
    }

    /// Ctrl/cmd-click: flip the item's membership without touching columns.
    pub fn handle_modified_click(&mut self, clicked_path: &str) {
        self.selection.toggle(&path::normalize(clicked_path), true);
        self.needs_render = true;
    }

    /// Shift-click: extend from the anchor across the column's visible order.
    /// Without an anchor this degrades to a plain single-select.
    pub fn handle_shift_click(&mut self, clicked_path: &str, column_index: usize) {
        let clicked = path::normalize(clicked_path);
        let anchor = match self.selection.last_selected() {
            Some(anchor) => anchor.to_string(),
            None => {
                self.selection.toggle(&clicked, false);
                self.needs_render = true;
                return;
            }
        };

        let visible = {
            let column = match self.columns.column(column_index) {
                Some(column) => column,
                None => return,
            };
            let provider = ItemDataProvider::new(&self.vault, &self.store, &self.settings);
            let store = &self.store;
            let max = self.settings.max_levels as usize;
            provider.visible_paths(column, column_index, &|p, i| store.is_marked(p) && i < max)
        };

        self.selection.select_range(&anchor, &clicked, &visible);
        self.needs_render = true;
    }

    /// Right-click target: keep the existing selection if the item is part of
    /// it, otherwise add the item without clearing history.
    pub fn select_for_context_menu(&mut self, clicked_path: &str) {
        let clicked = path::normalize(clicked_path);
        if !self.selection.has(&clicked) {
            self.selection.add(&clicked);
            self.needs_render = true;
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.clear().is_empty() {
            self.needs_render = true;
        }
    }

    // ──────────────────────────────────────────────
    // Marking
    // ──────────────────────────────────────────────

    /// Mark a folder to open horizontally. Rejected when the marked chain has
    /// a gap above the folder or the chain already sits at max depth.
    pub fn mark_folder(&mut self, folder_path: &str) -> bool {
        let folder = path::normalize(folder_path);
        if self.store.is_marked(&folder) {
            return false;
        }
        if !self.levels.can_mark_as_subfolder(&self.store, &folder) {
            return false;
        }
        self.store.mark(&folder);
        self.events.push(NavEvent::FolderMarked { path: folder });
        self.needs_render = true;
        true
    }

    /// Unmark a folder, cascading-closing its open column if it has one.
    pub fn unmark_folder(&mut self, folder_path: &str) -> bool {
        let folder = path::normalize(folder_path);
        if !self.store.is_marked(&folder) {
            return false;
        }
        self.store.unmark(&folder);
        let open_at = self
            .columns
            .columns()
            .iter()
            .position(|c| c.folder_path == folder);
        if let Some(index) = open_at {
            self.columns.close_from(index);
            self.persist_ui_state();
        }
        self.events.push(NavEvent::FolderUnmarked { path: folder });
        self.needs_render = true;
        true
    }

    pub fn can_mark(&self, folder_path: &str) -> bool {
        let folder = path::normalize(folder_path);
        !self.store.is_marked(&folder) && self.levels.can_mark_as_subfolder(&self.store, &folder)
    }

    // ──────────────────────────────────────────────
    // Column operations
    // ──────────────────────────────────────────────

    pub fn close_column(&mut self, index: usize) {
        if self.columns.close_from(index) {
            self.persist_ui_state();
            self.needs_render = true;
        }
    }

    pub fn toggle_column_collapse(&mut self, index: usize) {
        if self.columns.toggle_collapse(index) {
            self.persist_ui_state();
            self.needs_render = true;
        }
    }

    pub fn collapse_column_tree(&mut self, index: usize) {
        if self.columns.collapse_tree(index) {
            self.persist_ui_state();
            self.needs_render = true;
        }
    }

    pub fn collapse_all(&mut self) {
        self.columns.collapse_all();
        self.selection.clear();
        self.persist_ui_state();
        self.needs_render = true;
    }

    /// Rebuild the column chain for a file's parent folder, exactly as manual
    /// clicking down that path would, then select the file.
    pub fn reveal_file(&mut self, file_path: &str) {
        let file = path::normalize(file_path);
        let parent = path::parent(&file).unwrap_or_else(|| "/".to_string());
        let store = &self.store;
        let max = self.settings.max_levels as usize;
        self.columns
            .navigate_to(&parent, |p, i| store.is_marked(p) && i < max);
        self.selection.toggle(&file, false);
        self.persist_ui_state();
        self.needs_render = true;
    }

    /// Active-file change notification from the host.
    pub fn on_active_file_changed(&mut self, file_path: &str) {
        if self.settings.auto_reveal_active_note {
            self.reveal_file(file_path);
        }
    }

    // ──────────────────────────────────────────────
    // File operations
    // ──────────────────────────────────────────────

    /// Create a new note/canvas/base in `folder` under a unique name and ask
    /// the host to open it. Returns the created path.
    pub fn create_file(&mut self, folder: &str, kind: NewFileKind) -> Option<String> {
        match fileops::create_file(&mut self.vault, &path::normalize(folder), kind) {
            Ok(created) => {
                self.events.push(NavEvent::OpenFile {
                    path: created.clone(),
                });
                self.needs_render = true;
                Some(created)
            }
            Err(err) => {
                log::warn!("create file in {folder} failed: {err}");
                None
            }
        }
    }

    pub fn create_folder(&mut self, parent: &str) -> Option<String> {
        match fileops::create_folder(&mut self.vault, &path::normalize(parent)) {
            Ok(created) => {
                self.needs_render = true;
                Some(created)
            }
            Err(err) => {
                log::warn!("create folder in {parent} failed: {err}");
                None
            }
        }
    }

    /// Rename an entry, cascading the new path through marks, metadata,
    /// shortcuts, and any open columns. Returns the new path.
    pub fn rename_item(&mut self, old_path: &str, new_name: &str, is_folder: bool) -> Option<String> {
        let old = path::normalize(old_path);
        match fileops::rename(&mut self.vault, &old, new_name, is_folder) {
            Ok(new_path) => {
                if new_path != old {
                    self.apply_rename(&old, &new_path);
                }
                Some(new_path)
            }
            Err(err) => {
                log::warn!("rename {old} failed: {err}");
                None
            }
        }
    }

    /// Request deletion of the given paths, or of the current selection when
    /// `paths` is empty. Parked behind a confirmation when settings say so.
    pub fn request_delete(&mut self, paths: Vec<String>) {
        let paths = if paths.is_empty() {
            self.selection.selected_paths()
        } else {
            paths.into_iter().map(|p| path::normalize(&p)).collect()
        };
        if paths.is_empty() {
            return;
        }
        if self.settings.confirm_before_delete {
            self.pending_delete = Some(PendingDelete { paths });
        } else {
            self.delete_now(&paths);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            self.delete_now(&pending.paths);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn delete_now(&mut self, paths: &[String]) {
        for target in paths {
            if let Err(err) = self.vault.trash(target) {
                log::warn!("trash {target} failed: {err}");
                continue;
            }
            self.apply_delete(target);
        }
        self.selection.clear();
        self.needs_render = true;
    }

    /// Move items into a target folder. Items that no longer exist, already
    /// live in the target, or would be moved into their own subtree are
    /// skipped; one failed move does not abort the rest.
    pub fn move_items(&mut self, item_paths: &[String], target_folder: &str) -> bool {
        let target = path::normalize(target_folder);
        if !self.is_existing_folder(&target) {
            return false;
        }

        let mut moved_any = false;
        for item in item_paths {
            let item = path::normalize(item);
            if !self.vault.exists(&item) {
                continue;
            }
            if item == target || path::is_descendant(&target, &item) {
                continue;
            }
            let parent = path::parent(&item).unwrap_or_else(|| "/".to_string());
            if parent == target {
                continue;
            }
            let new_path = path::join(&target, &path::leaf_name(&item));
            match self.vault.rename(&item, &new_path) {
                Ok(()) => {
                    self.apply_rename(&item, &new_path);
                    moved_any = true;
                }
                Err(err) => {
                    log::warn!("move {item} to {target} failed: {err}");
                }
            }
        }

        if moved_any {
            self.selection.clear();
            self.needs_render = true;
        }
        moved_any
    }

    fn is_existing_folder(&self, folder_path: &str) -> bool {
        if folder_path == "/" {
            return true;
        }
        let parent = path::parent(folder_path).unwrap_or_else(|| "/".to_string());
        self.vault
            .list_children(&parent)
            .iter()
            .any(|c| c.is_dir && c.path == folder_path)
    }

    // ──────────────────────────────────────────────
    // Drag and drop
    // ──────────────────────────────────────────────

    pub fn begin_drag(&mut self, item_path: &str, kind: ItemKind, source_column: usize) {
        self.drag
            .start(&path::normalize(item_path), kind, source_column);
    }

    /// Complete a drag over a folder. The transient drag reference is cleared
    /// up front so every exit path releases it.
    pub fn drop_on_folder(&mut self, target_folder: &str) -> bool {
        let dragged = match self.drag.clear() {
            Some(dragged) => dragged,
            None => return false,
        };
        let items = if self.selection.has(&dragged.path) {
            self.selection.selected_paths()
        } else {
            vec![dragged.path]
        };
        self.move_items(&items, target_folder)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.clear();
    }

    // ──────────────────────────────────────────────
    // Shortcuts
    // ──────────────────────────────────────────────

    pub fn add_shortcut(&mut self, item_path: &str, kind: ShortcutKind) {
        let target = path::normalize(item_path);
        let id = format!("shortcut-{}", target.replace('/', "-"));
        if self.store.shortcuts().iter().any(|s| s.id == id) {
            return;
        }
        let sort_index = self.store.shortcuts().len();
        self.store.add_shortcut(Shortcut {
            id: id.clone(),
            kind,
            path: target,
            query: None,
            icon: None,
            color: None,
            sort_index,
        });
        self.events.push(NavEvent::ShortcutAdded { id });
        self.needs_render = true;
    }

    pub fn remove_shortcut(&mut self, id: &str) {
        self.store.remove_shortcut(id);
        self.events.push(NavEvent::ShortcutRemoved { id: id.to_string() });
        self.needs_render = true;
    }

    // ──────────────────────────────────────────────
    // External change notifications
    // ──────────────────────────────────────────────

    pub fn on_vault_create(&mut self, _created_path: &str) {
        self.needs_render = true;
    }

    pub fn on_vault_delete(&mut self, deleted_path: &str) {
        self.apply_delete(&path::normalize(deleted_path));
        self.needs_render = true;
    }

    pub fn on_vault_rename(&mut self, old_path: &str, new_path: &str) {
        self.apply_rename(&path::normalize(old_path), &path::normalize(new_path));
    }

    /// Drop marked folders whose directory no longer exists on disk.
    pub fn prune_invalid_marks(&mut self) {
        let existing: HashSet<String> = self
            .store
            .marked_folders()
            .iter()
            .filter(|p| self.vault.exists(p))
            .cloned()
            .collect();
        let invalid = self.store.validate(&existing);
        for folder in invalid {
            self.store.unmark(&folder);
            self.needs_render = true;
        }
    }

    /// Close the leftmost column whose folder has gone away, which truncates
    /// everything to its right along with it.
    pub fn prune_stale_columns(&mut self) {
        let stale = self
            .columns
            .columns()
            .iter()
            .position(|c| c.folder_path != "/" && !self.vault.exists(&c.folder_path));
        if let Some(index) = stale {
            self.columns.close_from(index);
            self.persist_ui_state();
            self.needs_render = true;
        }
    }

    fn apply_rename(&mut self, old_path: &str, new_path: &str) {
        self.store.on_external_rename(old_path, new_path);

        let rewrite = |p: &str| -> Option<String> {
            if p == old_path {
                Some(new_path.to_string())
            } else if path::is_descendant(p, old_path) {
                Some(format!("{new_path}{}", &p[old_path.len()..]))
            } else {
                None
            }
        };

        let mut columns: Vec<Column> = self.columns.columns().to_vec();
        for column in &mut columns {
            if let Some(renamed) = rewrite(&column.folder_path) {
                column.folder_path = renamed;
            }
            if let Some(selected) = &column.selected_item {
                if let Some(renamed) = rewrite(selected) {
                    column.selected_item = Some(renamed);
                }
            }
            column.expanded_folders = column
                .expanded_folders
                .iter()
                .map(|p| rewrite(p).unwrap_or_else(|| p.clone()))
                .collect();
        }
        self.columns.set_columns(columns);

        self.selection.clear();
        self.persist_ui_state();
        self.needs_render = true;
    }

    fn apply_delete(&mut self, deleted_path: &str) {
        self.store.on_external_delete(deleted_path);

        let selected = self.selection.selected_paths();
        if selected
            .iter()
            .any(|p| p == deleted_path || path::is_descendant(p, deleted_path))
        {
            self.selection.clear();
        }

        let stale = self.columns.columns().iter().position(|c| {
            c.folder_path == deleted_path || path::is_descendant(&c.folder_path, deleted_path)
        });
        if let Some(index) = stale {
            self.columns.close_from(index);
        }
        self.persist_ui_state();
    }

    // ──────────────────────────────────────────────
    // Settings
    // ──────────────────────────────────────────────

    /// Settings persistence stays with the host; the panel only applies them.
    pub fn set_max_levels(&mut self, max_levels: u8) {
        self.levels.set_max_levels(max_levels);
        self.settings.max_levels = self.levels.max_levels();
        self.needs_render = true;
    }

    pub fn update_settings(&mut self, settings: NavSettings) {
        self.levels.set_max_levels(settings.max_levels);
        self.settings = settings;
        self.settings.max_levels = self.levels.max_levels();
        self.needs_render = true;
    }

    // ──────────────────────────────────────────────
    // Persistence and rendering
    // ──────────────────────────────────────────────

    /// Mirror the live column chain into the stored UI layout, scheduling a
    /// debounced write.
    pub fn persist_ui_state(&mut self) {
        let serialized = self.columns.serialize();
        self.store.update_ui_state(|ui| {
            ui.expanded_folders = serialized
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.expanded_folders.clone()))
                .collect();
            ui.selected_path = serialized
                .iter()
                .filter_map(|c| c.selected_item.clone())
                .collect();
            ui.active_level = serialized.len() as i32 - 1;
            ui.is_collapsed =
                serialized.len() > 1 && serialized.iter().skip(1).all(|c| c.is_collapsed);
        });
    }

    /// Rebuild the column chain from the stored layout, stopping at the first
    /// folder that no longer exists.
    pub fn restore_ui_state(&mut self) {
        let ui = self.store.ui_state().clone();
        let mut serialized = vec![SerializedColumn {
            folder_path: "/".to_string(),
            selected_item: None,
            expanded_folders: ui.expanded_folders.get(&0).cloned().unwrap_or_default(),
            is_collapsed: false,
        }];

        for (i, folder) in ui.selected_path.iter().enumerate() {
            if !self.vault.exists(folder) {
                break;
            }
            if let Some(last) = serialized.last_mut() {
                last.selected_item = Some(folder.clone());
            }
            serialized.push(SerializedColumn {
                folder_path: folder.clone(),
                selected_item: None,
                expanded_folders: ui.expanded_folders.get(&(i + 1)).cloned().unwrap_or_default(),
                is_collapsed: ui.is_collapsed,
            });
        }

        self.columns.deserialize(serialized);
        self.needs_render = true;
    }

    /// Flush debounced saves whose deadline has passed. Call from the host's
    /// idle/tick loop.
    pub fn tick(&mut self) -> bool {
        self.store.poll_saves()
    }

    /// Persist everything synchronously. Call on panel close.
    pub fn shutdown(&mut self) {
        self.persist_ui_state();
        self.store.flush_all();
    }

    /// Build the full render model and clear the dirty flag.
    pub fn render_columns(&mut self) -> Vec<ColumnView> {
        let provider = ItemDataProvider::new(&self.vault, &self.store, &self.settings);
        let store = &self.store;
        let max = self.settings.max_levels as usize;
        let horizontally = |p: &str, i: usize| store.is_marked(p) && i < max;
        let widths = &self.store.ui_state().pane_widths;

        let views = self
            .columns
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| ColumnView {
                index,
                folder_path: column.folder_path.clone(),
                title: if column.folder_path == "/" {
                    self.vault.display_name()
                } else {
                    path::leaf_name(&column.folder_path)
                },
                selected_item: column.selected_item.clone(),
                is_collapsed: column.is_collapsed,
                width: widths.get(index).copied().unwrap_or(200.0),
                items: provider.column_items(column, index, &horizontally),
            })
            .collect();

        self.needs_render = false;
        views
    }
}
