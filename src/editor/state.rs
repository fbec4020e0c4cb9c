//! Editing states and the controls each one exposes.
//!
//! ```text
//!              edit              keystroke
//!  unedited ─────────▶ editing ───────────▶ edited ─┐
//!     ▲  ▲                │                   │  ▲  │ save rejected
//!     │  └── cancel ──────┘                   │  └──┘
//!     └──────────── save ok / cancel ─────────┘
//!
//!  broken: entered from load, terminal
//! ```

use crate::error::{EditorError, Result};
use std::fmt;

/// Where an editing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorState {
    /// Showing server content, read-only
    Unedited,
    /// Buffer unlocked, nothing typed yet
    Editing,
    /// Buffer differs from what was loaded
    Edited,
    /// No content type could be determined; terminal
    Broken,
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditorState::Unedited => "unedited",
            EditorState::Editing => "editing",
            EditorState::Edited => "edited",
            EditorState::Broken => "broken",
        })
    }
}

/// Which controls are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub edit: bool,
    pub compact: bool,
    pub save: bool,
    pub cancel: bool,
}

/// Color class of the buffer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Muted,
    Normal,
    Modified,
    Rejected,
}

/// State machine gating edit, save, cancel and compact.
///
/// Once [`EditorStateMachine::mark_broken`] has been called every other
/// transition is ignored or refused.
#[derive(Debug, Clone)]
pub struct EditorStateMachine {
    state: EditorState,
    writable: bool,
    compactable: bool,
    container: bool,
    compacted: bool,
    rejected: bool,
}

impl EditorStateMachine {
    /// `container` resources (URI ending in `/`) are never editable.
    pub fn new(container: bool) -> Self {
        EditorStateMachine {
            state: EditorState::Unedited,
            writable: false,
            compactable: false,
            container,
            compacted: false,
            rejected: false,
        }
    }

    #[inline]
    pub fn state(&self) -> EditorState {
        self.state
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.state == EditorState::Broken
    }

    pub fn writable(&self) -> bool {
        self.writable
    }

    /// Update what the resource metadata allows.
    pub fn configure(&mut self, writable: bool, compactable: bool) {
        self.writable = writable;
        self.compactable = compactable;
    }

    /// Return to `unedited` after a load or a completed save.
    pub fn mark_unedited(&mut self) {
        if self.is_broken() {
            return;
        }
        self.transition(EditorState::Unedited);
        self.compacted = false;
        self.rejected = false;
    }

    /// Unlock the buffer. Only allowed from `unedited` on an editable resource.
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.state != EditorState::Unedited || !self.editable() {
            return Err(self.refuse("edit"));
        }
        self.transition(EditorState::Editing);
        Ok(())
    }

    /// Record a keystroke. Returns `false` when the buffer is locked.
    pub fn mark_modified(&mut self) -> bool {
        match self.state {
            EditorState::Editing | EditorState::Edited => {
                self.transition(EditorState::Edited);
                self.rejected = false;
                true
            }
            _ => false,
        }
    }

    /// A save was rejected by validation; stay `edited` with the buffer flagged.
    pub fn flag_invalid(&mut self) {
        if self.is_broken() {
            return;
        }
        self.transition(EditorState::Edited);
        self.rejected = true;
    }

    /// The buffer was replaced by its compacted form.
    pub fn note_compacted(&mut self) {
        if self.state == EditorState::Unedited {
            self.compacted = true;
        }
    }

    pub fn mark_broken(&mut self) {
        self.transition(EditorState::Broken);
    }

    pub fn can_save(&self) -> bool {
        self.state == EditorState::Edited
    }

    pub fn can_cancel(&self) -> bool {
        match self.state {
            EditorState::Editing | EditorState::Edited => true,
            EditorState::Unedited => self.compacted,
            EditorState::Broken => false,
        }
    }

    pub fn can_compact(&self) -> bool {
        self.state == EditorState::Unedited && self.compactable && self.writable
    }

    pub fn buffer_mutable(&self) -> bool {
        matches!(self.state, EditorState::Editing | EditorState::Edited)
    }

    /// Control visibility for the current state.
    pub fn controls(&self) -> Controls {
        match self.state {
            EditorState::Unedited => Controls {
                edit: self.editable(),
                compact: self.can_compact(),
                save: false,
                cancel: self.compacted,
            },
            EditorState::Editing => Controls {
                cancel: true,
                ..Controls::default()
            },
            EditorState::Edited => Controls {
                save: true,
                cancel: true,
                ..Controls::default()
            },
            EditorState::Broken => Controls::default(),
        }
    }

    pub fn tone(&self) -> TextTone {
        match self.state {
            EditorState::Unedited | EditorState::Broken => TextTone::Muted,
            EditorState::Editing => TextTone::Normal,
            EditorState::Edited if self.rejected => TextTone::Rejected,
            EditorState::Edited => TextTone::Modified,
        }
    }

    fn editable(&self) -> bool {
        self.writable && !self.container
    }

    fn transition(&mut self, next: EditorState) {
        if self.state != next {
            tracing::debug!("editor {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn refuse(&self, action: &'static str) -> EditorError {
        tracing::debug!("refused to {} while {}", action, self.state);
        EditorError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}
