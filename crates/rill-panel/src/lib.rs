//! The panel layer: wires the vault, the membership store, and the column and
//! selection state machines into one controller a presentation adapter can
//! drive with plain click/drag/menu events.

mod controller;
mod drag;
mod events;
mod fileops;
mod items;
mod settings;


pub use controller::{ColumnView, NavPanel, PendingDelete};
pub use drag::{DragState, DraggedItem};
pub use events::{EventQueue, NavEvent};
pub use fileops::{unique_name, NewFileKind};
pub use items::ItemDataProvider;
pub use settings::{load_settings, save_settings, NavSettings};
