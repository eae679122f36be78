use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The three persisted documents, each debounced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Folders,
    Shortcuts,
    UiState,
}

impl DocKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DocKind::Folders => "folders.json",
            DocKind::Shortcuts => "shortcuts.json",
            DocKind::UiState => "state.json",
        }
    }
}

/// Coalesces rapid successive edits into one write per document. Each
/// mutation replaces the document's pending deadline; a document is written
/// once its deadline passes, or immediately on `take_all` at shutdown.
#[derive(Debug, Default)]
pub struct SaveScheduler {
    pending: HashMap<DocKind, Instant>,
}

pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

impl SaveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) a write for `kind`.
    pub fn mark_dirty(&mut self, kind: DocKind, now: Instant) {
        self.pending.insert(kind, now + SAVE_DEBOUNCE);
    }

    /// Documents whose deadline has passed. Removed from the pending map.
    pub fn take_due(&mut self, now: Instant) -> Vec<DocKind> {
        let due: Vec<DocKind> = self
            .pending
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(kind, _)| *kind)
            .collect();
        for kind in &due {
            self.pending.remove(kind);
        }
        due
    }

    /// All pending documents regardless of deadline (shutdown flush).
    pub fn take_all(&mut self) -> Vec<DocKind> {
        self.pending.drain().map(|(kind, _)| kind).collect()
    }

    pub fn is_pending(&self, kind: DocKind) -> bool {
        self.pending.contains_key(&kind)
    }
}
