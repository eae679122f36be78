// Create/rename/move helpers shared by the controller.

use rill_core::path;
use rill_core::{Vault, VaultError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Kinds of files the panel can create directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewFileKind {
    Note,
    Canvas,
    Base,
}

struct FileTypeConfig {
    extension: &'static str,
    default_name: &'static str,
    default_content: &'static str,
}

impl NewFileKind {
    fn config(self) -> FileTypeConfig {
        match self {
            NewFileKind::Note => FileTypeConfig {
                extension: "md",
                default_name: "Untitled",
                default_content: "",
            },
            NewFileKind::Canvas => FileTypeConfig {
                extension: "canvas",
                default_name: "Untitled",
                default_content: r#"{"nodes":[],"edges":[]}"#,
            },
            NewFileKind::Base => FileTypeConfig {
                extension: "base",
                default_name: "Untitled",
                default_content: r#"{"columns":[],"rows":[]}"#,
            },
        }
    }
}

/// Find a name under `parent` that does not collide with an existing entry,
/// counting up from "Name (1)". `extension` is empty for folders.
pub fn unique_name<V: Vault>(vault: &V, parent: &str, base: &str, extension: &str) -> String {
    let candidate = |suffix: &str| {
        if extension.is_empty() {
            format!("{base}{suffix}")
        } else {
            format!("{base}{suffix}.{extension}")
        }
    };

    let initial = candidate("");
    if !vault.exists(&path::join(parent, &initial)) {
        return initial;
    }

    for counter in 1..1000 {
        let numbered = candidate(&format!(" ({counter})"));
        if !vault.exists(&path::join(parent, &numbered)) {
            return numbered;
        }
    }

    // Practically unreachable; a timestamp keeps the name unique anyway.
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    candidate(&format!(" ({stamp})"))
}

/// Create a new file of the given kind in `folder`, returning its path.
pub fn create_file<V: Vault>(
    vault: &mut V,
    folder: &str,
    kind: NewFileKind,
) -> Result<String, VaultError> {
    let config = kind.config();
    let name = unique_name(vault, folder, config.default_name, config.extension);
    let file_path = path::join(folder, &name);
    vault.create_file(&file_path, config.default_content)?;
    Ok(file_path)
}

/// Create a "New Folder" (or the first free numbered variant) in `parent`.
pub fn create_folder<V: Vault>(vault: &mut V, parent: &str) -> Result<String, VaultError> {
    let name = unique_name(vault, parent, "New Folder", "");
    let folder_path = path::join(parent, &name);
    vault.create_folder(&folder_path)?;
    Ok(folder_path)
}

/// Rename an entry in place, keeping a file's extension. Returns the new path.
pub fn rename<V: Vault>(
    vault: &mut V,
    old_path: &str,
    new_name: &str,
    is_folder: bool,
) -> Result<String, VaultError> {
    let parent = path::parent(old_path).unwrap_or_default();
    let new_leaf = if is_folder {
        new_name.to_string()
    } else {
        match path::leaf_name(old_path).rsplit_once('.') {
            Some((_, ext)) => format!("{new_name}.{ext}"),
            None => new_name.to_string(),
        }
    };
    let new_path = path::join(&parent, &new_leaf);
    if new_path == old_path {
        return Ok(new_path);
    }
    vault.rename(old_path, &new_path)?;
    Ok(new_path)
}
