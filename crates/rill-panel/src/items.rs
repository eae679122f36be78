// Item data layer: turns vault listings plus membership metadata into the
// plain PaneItem lists a presentation adapter renders.

use crate::settings::NavSettings;
use rill_core::{ItemKind, MarkedFolders, PaneItem, Vault, VaultItem, VirtualKind};
use rill_nav::Column;
use rill_store::FolderStore;

/// File types with a dedicated icon; anything else gets a generic icon and
/// an uppercase extension label.
const KNOWN_EXTENSIONS: &[(&str, &str)] = &[
    ("md", "file-text"),
    ("canvas", "layout-dashboard"),
    ("base", "database"),
    ("pdf", "file-type"),
    ("png", "image"),
    ("jpg", "image"),
    ("jpeg", "image"),
    ("gif", "image"),
    ("svg", "image"),
    ("webp", "image"),
    ("mp3", "music"),
    ("wav", "music"),
    ("mp4", "video"),
    ("webm", "video"),
];

fn known_icon(extension: &str) -> Option<&'static str> {
    KNOWN_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, icon)| *icon)
}

pub struct ItemDataProvider<'a, V: Vault> {
    vault: &'a V,
    store: &'a FolderStore,
    settings: &'a NavSettings,
}

impl<'a, V: Vault> ItemDataProvider<'a, V> {
    pub fn new(vault: &'a V, store: &'a FolderStore, settings: &'a NavSettings) -> Self {
        Self {
            vault,
            store,
            settings,
        }
    }

    /// Non-filesystem entries pinned to the top of the root column.
    pub fn virtual_items(&self) -> Vec<PaneItem> {
        let mut items = Vec::new();

        if self.settings.show_recent_notes {
            items.push(virtual_item("Recent", "__recent__", VirtualKind::Recent, "clock"));
        }
        if self.settings.show_tags {
            items.push(virtual_item("Tags", "__tags__", VirtualKind::Tags, "tag"));
        }
        if self.settings.show_shortcuts {
            items.push(virtual_item(
                "Shortcuts",
                "__shortcuts__",
                VirtualKind::Shortcuts,
                "star",
            ));
        }

        items
    }

    fn include_folder(&self, item: &VaultItem) -> bool {
        !item.name.starts_with('.') && !self.settings.excluded_folders.contains(&item.path)
    }

    fn include_file(&self, item: &VaultItem) -> bool {
        match &item.extension {
            Some(ext) => !self
                .settings
                .ignored_extensions
                .iter()
                .any(|ignored| ignored.eq_ignore_ascii_case(ext)),
            None => true,
        }
    }

    fn has_visible_children(&self, folder: &str) -> bool {
        self.vault.list_children(folder).iter().any(|child| {
            if child.is_dir {
                self.include_folder(child)
            } else {
                self.include_file(child)
            }
        })
    }

    fn note_count(&self, folder: &str) -> usize {
        self.vault
            .list_children(folder)
            .iter()
            .filter(|c| !c.is_dir && c.extension.as_deref() == Some("md"))
            .count()
    }

    /// Direct children of a folder as pane items, folders first, each group
    /// alphabetical. Hidden dot-folders, excluded folders, and ignored
    /// extensions are filtered out before construction.
    pub fn folder_items(&self, folder: &str, indent: usize) -> Vec<PaneItem> {
        let mut items: Vec<PaneItem> = Vec::new();

        for child in self.vault.list_children(folder) {
            if child.is_dir {
                if !self.include_folder(&child) {
                    continue;
                }
                let metadata = self.store.metadata(&child.path);
                let mut item = PaneItem::folder(&child.path, &child.name, indent);
                item.is_marked = self.store.is_marked(&child.path);
                item.has_children = self.has_visible_children(&child.path);
                item.icon = metadata
                    .and_then(|m| m.icon.clone())
                    .or_else(|| Some("folder".to_string()));
                item.color = metadata.and_then(|m| m.color.clone());
                if self.settings.show_note_count {
                    item.note_count = Some(self.note_count(&child.path));
                }
                items.push(item);
            } else {
                if !self.include_file(&child) {
                    continue;
                }
                let ext = child.extension.as_deref().unwrap_or("");
                let basename = child
                    .name
                    .strip_suffix(&format!(".{ext}"))
                    .unwrap_or(&child.name);
                let mut item = PaneItem::file(&child.path, basename, indent);
                match known_icon(ext) {
                    Some(icon) => item.icon = Some(icon.to_string()),
                    None => {
                        item.icon = Some("file".to_string());
                        if !ext.is_empty() {
                            item.extension = Some(ext.to_uppercase());
                        }
                    }
                }
                items.push(item);
            }
        }

        // The vault already sorts folders-first alphabetically; filtering
        // preserves that order.
        items
    }

    /// Full item list for one column, with inline expansion applied: an
    /// expanded folder that does not open horizontally contributes its own
    /// children at the next indent.
    pub fn column_items(
        &self,
        column: &Column,
        column_index: usize,
        opens_horizontally: &dyn Fn(&str, usize) -> bool,
    ) -> Vec<PaneItem> {
        let mut out = Vec::new();

        // Virtual entries sit above the real tree in the root column.
        if column.folder_path == "/" && column_index == 0 {
            out.extend(self.virtual_items());
        }
        self.collect_expanded(
            &column.folder_path,
            0,
            column,
            column_index,
            opens_horizontally,
            &mut out,
        );

        out
    }

    fn collect_expanded(
        &self,
        folder: &str,
        indent: usize,
        column: &Column,
        column_index: usize,
        opens_horizontally: &dyn Fn(&str, usize) -> bool,
        out: &mut Vec<PaneItem>,
    ) {
        for item in self.folder_items(folder, indent) {
            let path = item.path.clone();
            let is_folder = item.kind == ItemKind::Folder;
            out.push(item);

            if is_folder
                && !opens_horizontally(&path, column_index)
                && column.expanded_folders.contains(&path)
            {
                self.collect_expanded(&path, indent + 1, column, column_index, opens_horizontally, out);
            }
        }
    }

    /// Visible real-item paths in display order, for shift-range selection.
    /// Virtual entries and the root row are not range-selectable.
    pub fn visible_paths(
        &self,
        column: &Column,
        column_index: usize,
        opens_horizontally: &dyn Fn(&str, usize) -> bool,
    ) -> Vec<String> {
        let mut items = Vec::new();
        self.collect_expanded(
            &column.folder_path,
            0,
            column,
            column_index,
            opens_horizontally,
            &mut items,
        );
        items.into_iter().map(|i| i.path).collect()
    }
}

fn virtual_item(name: &str, path: &str, kind: VirtualKind, icon: &str) -> PaneItem {
    PaneItem {
        id: format!("virtual-{}", name.to_lowercase()),
        kind: ItemKind::Virtual,
        name: name.to_string(),
        path: path.to_string(),
        level: 0,
        is_marked: false,
        has_children: false,
        icon: Some(icon.to_string()),
        color: None,
        virtual_kind: Some(kind),
        note_count: None,
        extension: None,
    }
}
