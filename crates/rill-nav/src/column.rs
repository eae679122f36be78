use rill_core::path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ──────────────────────────────────────────────
// Column state
// ──────────────────────────────────────────────

/// One Miller column: the folder it displays plus its transient sub-state.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub folder_path: String,
    /// The child path that opened the next column to the right, if any.
    pub selected_item: Option<String>,
    /// Folders expanded inline within this column's subtree.
    pub expanded_folders: HashSet<String>,
    /// Rendered as a thin strip when true.
    pub is_collapsed: bool,
}

impl Column {
    pub fn new(folder_path: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
            selected_item: None,
            expanded_folders: HashSet::new(),
            is_collapsed: false,
        }
    }

    fn root() -> Self {
        Self::new("/")
    }
}

/// Serializable column snapshot: the expansion set becomes an ordered list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedColumn {
    pub folder_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_item: Option<String>,
    #[serde(default)]
    pub expanded_folders: Vec<String>,
    #[serde(default)]
    pub is_collapsed: bool,
}

// ──────────────────────────────────────────────
// ColumnManager
// ──────────────────────────────────────────────

/// Ordered list of columns forming a left-to-right navigation chain.
/// Column 0 always shows the vault root and is never removed.
///
/// Methods mutate state but never render; invalid indices are no-ops and the
/// `bool` return tells the caller whether anything changed.
pub struct ColumnManager {
    columns: Vec<Column>,
}

impl Default for ColumnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnManager {
    pub fn new() -> Self {
        Self {
            columns: vec![Column::root()],
        }
    }

    // ── Accessors ──

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        false // column 0 always exists
    }

    /// Replace the full column list (state restoration). An empty list is
    /// rejected in favor of the default root column.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        if columns.is_empty() {
            self.reset();
        } else {
            self.columns = columns;
        }
    }

    /// Back to a single fresh root column.
    pub fn reset(&mut self) {
        self.columns = vec![Column::root()];
    }

    // ── Column operations ──

    /// Flip the collapsed strip state of a column.
    pub fn toggle_collapse(&mut self, index: usize) -> bool {
        match self.columns.get_mut(index) {
            Some(col) => {
                col.is_collapsed = !col.is_collapsed;
                true
            }
            None => false,
        }
    }

    /// Clear all inline expansions in a column without removing the column.
    /// Returns true if anything was expanded.
    pub fn collapse_tree(&mut self, index: usize) -> bool {
        match self.columns.get_mut(index) {
            Some(col) => {
                let had_expanded = !col.expanded_folders.is_empty();
                col.expanded_folders.clear();
                had_expanded
            }
            None => false,
        }
    }

    /// Close all columns from `index` onwards and clear the previous
    /// column's selection. The root column cannot be closed.
    pub fn close_from(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.columns.len() {
            return false;
        }
        self.columns[index - 1].selected_item = None;
        self.columns.truncate(index);
        true
    }

    /// Open a folder's children as a new column to the right of
    /// `from_index`, truncating anything beyond it. Per-folder uniqueness:
    /// if any column already shows this folder the call is a no-op.
    pub fn open_subfolder(&mut self, folder_path: &str, from_index: usize) -> bool {
        if from_index >= self.columns.len() {
            return false;
        }
        let normalized = path::normalize(folder_path);

        if self.columns.iter().any(|col| col.folder_path == normalized) {
            return false;
        }

        self.columns.truncate(from_index + 1);
        self.columns[from_index].selected_item = Some(normalized.clone());
        self.columns.push(Column::new(normalized));
        true
    }

    /// Toggle inline expansion of a folder within a column. Only meaningful
    /// for folders that do not open horizontally.
    pub fn toggle_expand(&mut self, folder_path: &str, index: usize) -> bool {
        match self.columns.get_mut(index) {
            Some(col) => {
                if !col.expanded_folders.remove(folder_path) {
                    col.expanded_folders.insert(folder_path.to_string());
                }
                true
            }
            None => false,
        }
    }

    pub fn expand_folder(&mut self, folder_path: &str, index: usize) {
        if let Some(col) = self.columns.get_mut(index) {
            col.expanded_folders.insert(folder_path.to_string());
        }
    }

    pub fn is_expanded(&self, folder_path: &str, index: usize) -> bool {
        self.columns
            .get(index)
            .is_some_and(|col| col.expanded_folders.contains(folder_path))
    }

    pub fn set_selected_item(&mut self, index: usize, path: Option<String>) {
        if let Some(col) = self.columns.get_mut(index) {
            col.selected_item = path;
        }
    }

    /// Collapse everything in place: all inline expansions cleared, every
    /// secondary column shrunk to a strip, root column kept open with no
    /// selection. Columns are retained, unlike `reset`.
    pub fn collapse_all(&mut self) {
        for col in &mut self.columns {
            col.expanded_folders.clear();
        }
        for col in self.columns.iter_mut().skip(1) {
            col.is_collapsed = true;
        }
        self.columns[0].is_collapsed = false;
        self.columns[0].selected_item = None;
    }

    /// A normal click in an earlier column that targets something other than
    /// the currently open selection closes every column to its right.
    pub fn close_columns_to_right(&mut self, index: usize, clicked_path: &str) -> bool {
        if index + 1 >= self.columns.len() {
            return false;
        }
        if self.columns[index].selected_item.as_deref() != Some(clicked_path) {
            self.columns.truncate(index + 1);
            self.columns[index].selected_item = None;
            return true;
        }
        false
    }

    /// Rebuild the chain for an arbitrary target folder, walking each
    /// segment root-to-leaf. `opens_horizontally(path, column_index)` must be
    /// the same predicate click handling uses, so the resulting layout is
    /// indistinguishable from manually clicking down the path.
    pub fn navigate_to(&mut self, target: &str, opens_horizontally: impl Fn(&str, usize) -> bool) {
        self.reset();
        let target = path::normalize(target);
        if target == "/" || target.is_empty() {
            return;
        }

        let mut current = String::new();
        let mut column_index = 0;
        for segment in target.split('/') {
            current = path::join(&current, segment);
            if opens_horizontally(&current, column_index) {
                self.open_subfolder(&current, column_index);
                column_index += 1;
            } else {
                self.expand_folder(&current, column_index);
            }
        }
    }

    // ── Serialization ──

    pub fn serialize(&self) -> Vec<SerializedColumn> {
        self.columns
            .iter()
            .map(|col| {
                let mut expanded: Vec<String> = col.expanded_folders.iter().cloned().collect();
                expanded.sort();
                SerializedColumn {
                    folder_path: col.folder_path.clone(),
                    selected_item: col.selected_item.clone(),
                    expanded_folders: expanded,
                    is_collapsed: col.is_collapsed,
                }
            })
            .collect()
    }

    pub fn deserialize(&mut self, data: Vec<SerializedColumn>) {
        let columns: Vec<Column> = data
            .into_iter()
            .map(|col| Column {
                folder_path: col.folder_path,
                selected_item: col.selected_item,
                expanded_folders: col.expanded_folders.into_iter().collect(),
                is_collapsed: col.is_collapsed,
            })
            .collect();
        self.set_columns(columns);
    }
}
