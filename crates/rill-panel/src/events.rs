use std::collections::VecDeque;

/// Things the host should react to. The panel pushes, the host drains;
/// the queue is owned by the panel instance, so two panels never share
/// listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    FolderMarked { path: String },
    FolderUnmarked { path: String },
    FolderSelected { path: String, level: i32 },
    /// The user activated a file; the host owns actually opening it.
    OpenFile { path: String },
    ShortcutAdded { id: String },
    ShortcutRemoved { id: String },
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<NavEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NavEvent) {
        self.events.push_back(event);
    }

    /// Remove and return all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<NavEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
