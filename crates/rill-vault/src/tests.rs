#[cfg(test)]
mod tests {
    use crate::FsVault;
    use rill_core::{Vault, VaultError};

    fn vault() -> (FsVault, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let vault = FsVault::unwatched(dir.path().to_path_buf());
        (vault, dir)
    }

    // ──────────────────────────────────────────
    // Listing
    // ──────────────────────────────────────────

    #[test]
    fn test_list_children_sorts_folders_first_then_alpha() {
        let (mut vault, _dir) = vault();
        vault.create_file("beta.md", "").unwrap();
        vault.create_file("Alpha.md", "").unwrap();
        vault.create_folder("zoo").unwrap();
        vault.create_folder("Attic").unwrap();

        let names: Vec<String> = vault
            .list_children("/")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["Attic", "zoo", "Alpha.md", "beta.md"]);
    }

    #[test]
    fn test_list_children_paths_are_vault_relative() {
        let (mut vault, _dir) = vault();
        vault.create_folder("Work").unwrap();
        vault.create_file("Work/notes.md", "hi").unwrap();

        let top = vault.list_children("/");
        assert_eq!(top[0].path, "Work");
        assert!(top[0].is_dir);

        let nested = vault.list_children("Work");
        assert_eq!(nested[0].path, "Work/notes.md");
        assert_eq!(nested[0].extension.as_deref(), Some("md"));
    }

    #[test]
    fn test_list_children_of_missing_folder_is_empty() {
        let (vault, _dir) = vault();
        assert!(vault.list_children("nope").is_empty());
    }

    // ──────────────────────────────────────────
    // Mutations
    // ──────────────────────────────────────────

    #[test]
    fn test_create_file_rejects_collision() {
        let (mut vault, _dir) = vault();
        vault.create_file("a.md", "one").unwrap();
        assert!(matches!(
            vault.create_file("a.md", "two"),
            Err(VaultError::AlreadyExists(_))
        ));
        assert_eq!(vault.read("a.md").unwrap(), "one");
    }

    #[test]
    fn test_rename_moves_and_guards() {
        let (mut vault, _dir) = vault();
        vault.create_folder("Work").unwrap();
        vault.create_file("Work/notes.md", "x").unwrap();

        vault.rename("Work/notes.md", "Work/ideas.md").unwrap();
        assert!(!vault.exists("Work/notes.md"));
        assert_eq!(vault.read("Work/ideas.md").unwrap(), "x");

        assert!(matches!(
            vault.rename("missing.md", "other.md"),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn test_rename_into_own_subtree_is_rejected_untouched() {
        let (mut vault, _dir) = vault();
        vault.create_folder("Work").unwrap();
        assert!(matches!(
            vault.rename("Work", "Work/inner"),
            Err(VaultError::InvalidTarget(_))
        ));
        assert!(vault.exists("Work"));
    }

    #[test]
    fn test_trash_preserves_leaf_name_and_numbers_collisions() {
        let (mut vault, dir) = vault();
        vault.create_file("notes.md", "v1").unwrap();
        vault.trash("notes.md").unwrap();
        assert!(!vault.exists("notes.md"));
        assert!(dir.path().join(".trash/notes.md").exists());

        vault.create_file("notes.md", "v2").unwrap();
        vault.trash("notes.md").unwrap();
        assert!(dir.path().join(".trash/notes.md (1)").exists());
    }

    #[test]
    fn test_trash_root_is_rejected() {
        let (mut vault, _dir) = vault();
        assert!(matches!(
            vault.trash("/"),
            Err(VaultError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_active_file_round_trip() {
        let (mut vault, _dir) = vault();
        assert_eq!(vault.active_file(), None);
        vault.set_active_file(Some("Work/notes.md".to_string()));
        assert_eq!(vault.active_file().as_deref(), Some("Work/notes.md"));
    }
}
