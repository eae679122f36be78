use rill_core::ItemKind;

/// Transient drag-and-drop state: what is being dragged and from where.
///
/// `clear` must be reached on every exit path - successful drop, cancelled
/// drag, failed move - or the panel leaks a stuck "currently dragging"
/// reference.
#[derive(Debug, Default)]
pub struct DragState {
    dragged: Option<DraggedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraggedItem {
    pub path: String,
    pub kind: ItemKind,
    pub source_column: usize,
}

impl DragState {
    pub fn start(&mut self, path: &str, kind: ItemKind, source_column: usize) {
        self.dragged = Some(DraggedItem {
            path: path.to_string(),
            kind,
            source_column,
        });
    }

    pub fn current(&self) -> Option<&DraggedItem> {
        self.dragged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Drop the transient reference. Returns the item for the completion
    /// handler, if a drag was in flight.
    pub fn clear(&mut self) -> Option<DraggedItem> {
        self.dragged.take()
    }
}
