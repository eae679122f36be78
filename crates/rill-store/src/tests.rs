#[cfg(test)]
mod tests {
    use crate::{DocKind, FolderStore, SaveScheduler, SAVE_DEBOUNCE};
    use rill_core::{FolderMetadata, MarkedFolders, Shortcut, ShortcutKind};
    use std::collections::HashSet;
    use std::time::Instant;

    fn store() -> (FolderStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FolderStore::load_from(dir.path().to_path_buf());
        (store, dir)
    }

    fn shortcut(id: &str, path: &str) -> Shortcut {
        Shortcut {
            id: id.to_string(),
            kind: ShortcutKind::File,
            path: path.to_string(),
            query: None,
            icon: None,
            color: None,
            sort_index: 0,
        }
    }

    // ──────────────────────────────────────────
    // Marking
    // ──────────────────────────────────────────

    #[test]
    fn test_mark_is_idempotent() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Work");
        store.mark("Work/");
        assert_eq!(store.marked_folders(), ["Work"]);
        assert!(store.is_marked("Work"));
    }

    #[test]
    fn test_unmark_removes_metadata_too() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.set_metadata(
            "Work",
            FolderMetadata {
                icon: Some("briefcase".to_string()),
                ..Default::default()
            },
        );
        assert!(store.metadata("Work").is_some());

        store.unmark("Work");
        assert!(!store.is_marked("Work"));
        assert!(store.metadata("Work").is_none());

        // Absent path: quiet no-op.
        store.unmark("Nope");
    }

    #[test]
    fn test_marked_order_is_insertion_order() {
        let (mut store, _dir) = store();
        store.mark("Zebra");
        store.mark("Apple");
        assert_eq!(store.marked_folders(), ["Zebra", "Apple"]);
    }

    // ──────────────────────────────────────────
    // Rename / delete cascades
    // ──────────────────────────────────────────

    #[test]
    fn test_rename_rewrites_marked_metadata_and_shortcuts() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Work/Archive");
        store.mark("Personal");
        store.set_metadata("Work", FolderMetadata::default());
        store.set_metadata("Work/Archive", FolderMetadata::default());
        store.add_shortcut(shortcut("s1", "Work/Archive/notes.md"));
        store.add_shortcut(shortcut("s2", "Personal/todo.md"));

        store.on_external_rename("Work", "Projects");

        assert_eq!(
            store.marked_folders(),
            ["Projects", "Projects/Archive", "Personal"]
        );
        assert!(store.metadata("Projects").is_some());
        assert!(store.metadata("Projects/Archive").is_some());
        assert!(store.metadata("Work").is_none());
        assert_eq!(store.shortcuts()[0].path, "Projects/Archive/notes.md");
        assert_eq!(store.shortcuts()[1].path, "Personal/todo.md");
    }

    #[test]
    fn test_rename_does_not_touch_similarly_prefixed_paths() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Workspace");
        store.on_external_rename("Work", "Projects");
        assert_eq!(store.marked_folders(), ["Projects", "Workspace"]);
    }

    #[test]
    fn test_rename_collision_keeps_single_entry() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Projects");
        store.on_external_rename("Work", "Projects");
        assert_eq!(store.marked_folders(), ["Projects"]);
    }

    #[test]
    fn test_delete_prunes_subtree() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Work/Archive");
        store.mark("Personal");
        store.set_metadata("Work/Archive", FolderMetadata::default());
        store.add_shortcut(shortcut("s1", "Work/Archive/notes.md"));
        store.add_shortcut(shortcut("s2", "Personal/todo.md"));

        store.on_external_delete("Work");

        assert_eq!(store.marked_folders(), ["Personal"]);
        assert!(store.metadata("Work/Archive").is_none());
        assert_eq!(store.shortcuts().len(), 1);
        assert_eq!(store.shortcuts()[0].id, "s2");
    }

    #[test]
    fn test_validate_is_pure() {
        let (mut store, _dir) = store();
        store.mark("Work");
        store.mark("Gone");

        let existing: HashSet<String> = ["Work".to_string()].into_iter().collect();
        let invalid = store.validate(&existing);
        assert_eq!(invalid, ["Gone"]);
        // No mutation happened.
        assert_eq!(store.marked_folders(), ["Work", "Gone"]);
    }

    // ──────────────────────────────────────────
    // Shortcuts & UI state
    // ──────────────────────────────────────────

    #[test]
    fn test_shortcut_add_remove() {
        let (mut store, _dir) = store();
        store.add_shortcut(shortcut("s1", "a.md"));
        store.add_shortcut(shortcut("s2", "b.md"));
        store.remove_shortcut("s1");
        assert_eq!(store.shortcuts().len(), 1);
        assert_eq!(store.shortcuts()[0].id, "s2");
    }

    #[test]
    fn test_update_ui_state() {
        let (mut store, _dir) = store();
        store.update_ui_state(|s| {
            s.active_level = 2;
            s.pane_widths = vec![240.0, 200.0];
        });
        assert_eq!(store.ui_state().active_level, 2);
        assert_eq!(store.ui_state().pane_widths, vec![240.0, 200.0]);
    }

    // ──────────────────────────────────────────
    // Debounced persistence
    // ──────────────────────────────────────────

    #[test]
    fn test_scheduler_replaces_pending_deadline() {
        let mut sched = SaveScheduler::new();
        let t0 = Instant::now();
        sched.mark_dirty(DocKind::Folders, t0);

        // A second mutation inside the window pushes the deadline out.
        let t1 = t0 + SAVE_DEBOUNCE / 2;
        sched.mark_dirty(DocKind::Folders, t1);

        assert!(sched.take_due(t0 + SAVE_DEBOUNCE).is_empty());
        let due = sched.take_due(t1 + SAVE_DEBOUNCE);
        assert_eq!(due, [DocKind::Folders]);
        // Taken once, gone after.
        assert!(sched.take_due(t1 + SAVE_DEBOUNCE).is_empty());
    }

    #[test]
    fn test_scheduler_tracks_documents_independently() {
        let mut sched = SaveScheduler::new();
        let t0 = Instant::now();
        sched.mark_dirty(DocKind::Folders, t0);
        sched.mark_dirty(DocKind::Shortcuts, t0 + SAVE_DEBOUNCE);

        let due = sched.take_due(t0 + SAVE_DEBOUNCE);
        assert_eq!(due, [DocKind::Folders]);
        assert!(sched.is_pending(DocKind::Shortcuts));
    }

    #[test]
    fn test_flush_all_writes_pending_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FolderStore::load_from(dir.path().to_path_buf());
        store.mark("Work");
        assert!(store.has_pending_saves());

        // Deadline has not passed, so polling writes nothing yet.
        assert!(!store.poll_saves());
        assert!(!dir.path().join("folders.json").exists());

        store.flush_all();
        assert!(!store.has_pending_saves());
        assert!(dir.path().join("folders.json").exists());
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FolderStore::load_from(dir.path().to_path_buf());
            store.mark("Work");
            store.set_metadata(
                "Work",
                FolderMetadata {
                    color: Some("#ff8800".to_string()),
                    ..Default::default()
                },
            );
            store.add_shortcut(shortcut("s1", "Work/notes.md"));
            store.update_ui_state(|s| s.active_level = 1);
            store.flush_all();
        }

        let reloaded = FolderStore::load_from(dir.path().to_path_buf());
        assert_eq!(reloaded.marked_folders(), ["Work"]);
        assert_eq!(
            reloaded.metadata("Work").unwrap().color.as_deref(),
            Some("#ff8800")
        );
        assert_eq!(reloaded.shortcuts()[0].path, "Work/notes.md");
        assert_eq!(reloaded.ui_state().active_level, 1);
    }

    #[test]
    fn test_malformed_document_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("folders.json"), "{not json").unwrap();

        let store = FolderStore::load_from(dir.path().to_path_buf());
        assert!(store.marked_folders().is_empty());
    }

    #[test]
    fn test_partial_document_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("folders.json"),
            r#"{"markedFolders": ["Work"]}"#,
        )
        .unwrap();

        let store = FolderStore::load_from(dir.path().to_path_buf());
        assert_eq!(store.marked_folders(), ["Work"]);
        assert!(store.metadata("Work").is_none());
    }
}
