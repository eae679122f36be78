use rill_core::{path, MarkedFolders};

/// Computes navigation levels from the marked-folder set.
///
/// A level counts marked folders from the root of a continuous marked chain:
/// a marked folder is its marked-ancestor count plus one, an unmarked child
/// hanging off a marked chain is the nearest marked ancestor's count plus
/// two, and anything with no marked ancestor at all is -1.
pub struct LevelComputer {
    max_levels: u8,
}

/// Horizontal nesting depth is configurable between 1 and 4.
const MIN_MAX_LEVELS: u8 = 1;
const MAX_MAX_LEVELS: u8 = 4;

impl LevelComputer {
    pub fn new(max_levels: u8) -> Self {
        Self {
            max_levels: max_levels.clamp(MIN_MAX_LEVELS, MAX_MAX_LEVELS),
        }
    }

    pub fn set_max_levels(&mut self, max_levels: u8) {
        self.max_levels = max_levels.clamp(MIN_MAX_LEVELS, MAX_MAX_LEVELS);
    }

    pub fn max_levels(&self) -> u8 {
        self.max_levels
    }

    /// Level of a folder, or -1 if it is unreachable through any marked
    /// ancestor chain.
    pub fn compute_level(&self, marked: &impl MarkedFolders, folder_path: &str) -> i32 {
        if marked.is_marked(folder_path) {
            return count_marked_ancestors(marked, folder_path) + 1;
        }

        // Nearest marked ancestor resolves the unmarked-child branch.
        let mut current = path::parent(folder_path);
        while let Some(ancestor) = current {
            if marked.is_marked(&ancestor) {
                return count_marked_ancestors(marked, &ancestor) + 2;
            }
            current = path::parent(&ancestor);
        }

        -1
    }

    /// Whether a folder may legally be marked.
    ///
    /// Top-level folders always qualify. Otherwise the chain above must be
    /// continuous - parent marked, or the grandparent marked when the parent
    /// is not (the check is exactly two levels deep, not a full ancestor
    /// walk) - and the parent's level must sit below the depth limit.
    pub fn can_mark_as_subfolder(&self, marked: &impl MarkedFolders, folder_path: &str) -> bool {
        let parent = match path::parent(folder_path) {
            None => return true,
            Some(p) => p,
        };

        if !marked.is_marked(&parent) {
            if let Some(grandparent) = path::parent(&parent) {
                if !marked.is_marked(&grandparent) {
                    return false;
                }
            }
        }

        let parent_level = self.compute_level(marked, &parent);
        !(parent_level >= 0 && parent_level >= self.max_levels as i32)
    }

    /// Every marked ancestor of a path, root-to-leaf, including the path
    /// itself when marked. Used for breadcrumb displays.
    pub fn marked_ancestors(&self, marked: &impl MarkedFolders, folder_path: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut current = String::new();
        for segment in folder_path.split('/') {
            current = path::join(&current, segment);
            if marked.is_marked(&current) {
                ancestors.push(current.clone());
            }
        }
        ancestors
    }

    /// Marked folders sitting at exactly the given level.
    pub fn folders_at_level(&self, marked: &impl MarkedFolders, level: i32) -> Vec<String> {
        marked
            .marked_paths()
            .into_iter()
            .filter(|p| self.compute_level(marked, p) == level)
            .collect()
    }

    /// Marked folders whose parent is absent or unmarked (the roots of each
    /// marked chain).
    pub fn root_marked_folders(&self, marked: &impl MarkedFolders) -> Vec<String> {
        marked
            .marked_paths()
            .into_iter()
            .filter(|p| match path::parent(p) {
                None => true,
                Some(parent) => !marked.is_marked(&parent),
            })
            .collect()
    }

    /// Marked folders whose immediate parent is `parent_path`.
    pub fn child_marked_folders(
        &self,
        marked: &impl MarkedFolders,
        parent_path: &str,
    ) -> Vec<String> {
        marked
            .marked_paths()
            .into_iter()
            .filter(|p| p != parent_path && path::parent(p).as_deref() == Some(parent_path))
            .collect()
    }
}

/// Count of marked proper ancestors (the path itself excluded).
fn count_marked_ancestors(marked: &impl MarkedFolders, folder_path: &str) -> i32 {
    let mut count = 0;
    let mut current = path::parent(folder_path);
    while let Some(ancestor) = current {
        if marked.is_marked(&ancestor) {
            count += 1;
        }
        current = path::parent(&ancestor);
    }
    count
}
