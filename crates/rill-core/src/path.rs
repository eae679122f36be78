//! Vault path helpers. Paths are plain `/`-separated strings relative to the
//! vault root; the root itself is the sentinel `"/"`.

/// Strip trailing slashes. `"/"` maps to itself.
pub fn normalize(path: &str) -> String {
    if path == "/" {
        return "/".to_string();
    }
    path.trim_end_matches('/').to_string()
}

/// Parent of a path. `None` for the root and for top-level paths.
pub fn parent(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }
    path.rfind('/').map(|idx| path[..idx].to_string())
}

/// Final path segment. The root maps to itself.
pub fn leaf_name(path: &str) -> String {
    if path == "/" || path.is_empty() {
        return path.to_string();
    }
    match path.rfind('/') {
        Some(idx) => path[idx + 1..].to_string(),
        None => path.to_string(),
    }
}

/// Join a parent and a child name. The root acts as an empty prefix so
/// top-level paths carry no leading slash.
pub fn join(parent: &str, name: &str) -> String {
    if parent == "/" || parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Whether `path` sits strictly below `ancestor`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return path != "/";
    }
    path.len() > ancestor.len() + 1 && path.starts_with(ancestor) && path.as_bytes()[ancestor.len()] == b'/'
}
