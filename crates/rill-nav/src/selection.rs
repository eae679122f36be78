use std::collections::HashSet;

/// Old and new selection sets from one operation, so the caller can compute
/// a minimal visual diff instead of re-rendering thousands of items.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub old: HashSet<String>,
    pub new: HashSet<String>,
}

/// Multi-selection set with a shift-range anchor.
#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: HashSet<String>,
    /// Anchor for shift+click range extension.
    last_selected: Option<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the selection. Returns the pre-clear set for diffing.
    pub fn clear(&mut self) -> HashSet<String> {
        let old = std::mem::take(&mut self.selected);
        self.last_selected = None;
        old
    }

    /// Plain click (`additive = false`) collapses the set to exactly the
    /// clicked path; ctrl/cmd-click (`additive = true`) flips membership.
    /// Either way the clicked path becomes the range anchor.
    pub fn toggle(&mut self, path: &str, additive: bool) -> SelectionChange {
        let old = self.selected.clone();

        if additive {
            if !self.selected.remove(path) {
                self.selected.insert(path.to_string());
            }
        } else {
            self.selected.clear();
            self.selected.insert(path.to_string());
        }

        self.last_selected = Some(path.to_string());

        SelectionChange {
            old,
            new: self.selected.clone(),
        }
    }

    /// Shift-click: union the closed interval between `from` and `to` (in
    /// the caller-supplied visible order) into the selection. If either end
    /// is not visible, nothing changes.
    pub fn select_range(&mut self, from: &str, to: &str, visible: &[String]) -> SelectionChange {
        let old = self.selected.clone();

        let from_index = visible.iter().position(|p| p == from);
        let to_index = visible.iter().position(|p| p == to);

        if let (Some(a), Some(b)) = (from_index, to_index) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            for p in &visible[start..=end] {
                self.selected.insert(p.clone());
            }
        }

        SelectionChange {
            old,
            new: self.selected.clone(),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// Silent insert, used by right-click-to-select so the anchor survives.
    pub fn add(&mut self, path: &str) {
        self.selected.insert(path.to_string());
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.selected.iter().cloned().collect();
        paths.sort();
        paths
    }

    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }
}
