// Navigation state machine for the rill columns panel.
// Pure state, no I/O: the panel crate decides when to re-render.

mod column;
mod level;
mod selection;

pub use column::{Column, ColumnManager, SerializedColumn};
pub use level::LevelComputer;
pub use selection::{SelectionChange, SelectionManager};
