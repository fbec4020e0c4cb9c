//! The editing pane and its state machine.
//!
//! # Module Organization
//!
//! ```text
//! editor/
//! ├── state   - EditorState, EditorStateMachine, Controls
//! ├── surface - RenderSurface trait, MemorySurface, widgets
//! ├── config  - EditorConfig
//! └── pane    - SourceEditor
//! ```
//!
//! # Examples
//!
//! ```
//! use source_editor::editor::{EditorState, EditorStateMachine};
//!
//! let mut machine = EditorStateMachine::new(false);
//! machine.configure(true, true);
//! machine.mark_unedited();
//! machine.begin_edit().unwrap();
//! assert!(machine.mark_modified());
//! assert_eq!(machine.state(), EditorState::Edited);
//! assert!(machine.controls().save);
//! ```

mod config;
mod pane;
mod state;
mod surface;

pub use config::{EditorConfig, ToneColors};
pub use pane::{EditBuffer, PaneElements, SourceEditor};
pub use state::{Controls, EditorState, EditorStateMachine, TextTone};
pub use surface::{
    button, error_block, EditorEvent, ElementId, EventKind, MemorySurface, RenderSurface,
};
