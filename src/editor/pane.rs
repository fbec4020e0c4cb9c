//! The source pane: one editing session over one resource.

use super::config::EditorConfig;
use super::state::{EditorState, EditorStateMachine};
use super::surface::{button, error_block, EditorEvent, ElementId, EventKind, RenderSurface};
use crate::client::Transport;
use crate::codec::RdfCodec;
use crate::compact::CompactTransform;
use crate::error::{EditorError, Result};
use crate::persistence::PersistenceController;
use crate::protocol::caret_offset;
use crate::store::SessionContext;
use crate::types::ResourceMetadata;
use crate::validate::SyntaxValidator;
use std::sync::Arc;

/// Text being edited and whether it differs from what the server holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub text: String,
    pub dirty: bool,
}

impl EditBuffer {
    /// A clean buffer holding server content.
    pub fn loaded(text: impl Into<String>) -> Self {
        EditBuffer {
            text: text.into(),
            dirty: false,
        }
    }

    /// Replace the text and mark the buffer dirty.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Elements making up the pane.
#[derive(Debug, Clone, Copy)]
pub struct PaneElements {
    pub root: ElementId,
    pub status: ElementId,
    pub text_area: ElementId,
    pub compact: ElementId,
    pub cancel: ElementId,
    pub save: ElementId,
    pub edit: ElementId,
}

/// Edits the raw text of one remote resource in place.
///
/// Failures while loading, validating, compacting or saving are rendered as
/// error blocks in the status row and then returned to the caller.
///
/// # Examples
///
/// ```ignore
/// let mut editor = SourceEditor::new(
///     "https://example.org/card.ttl",
///     MemorySurface::new(),
///     Arc::new(HttpClient::new()?),
///     codec,
///     SessionContext::new(),
///     EditorConfig::default(),
/// )?;
/// editor.open().await?;
/// editor.handle_event(EditorEvent::EditClicked).await?;
/// ```
pub struct SourceEditor<S: RenderSurface> {
    uri: String,
    surface: S,
    config: EditorConfig,
    elements: PaneElements,
    machine: EditorStateMachine,
    metadata: ResourceMetadata,
    buffer: EditBuffer,
    persistence: PersistenceController,
    validator: SyntaxValidator,
    compactor: CompactTransform,
}

impl<S: RenderSurface> SourceEditor<S> {
    /// Build the pane for `uri` on `surface`. Nothing is fetched until [`SourceEditor::open`].
    ///
    /// `uri` must be absolute. It is kept exactly as given and used as the
    /// key for the session graph and request cache.
    pub fn new(
        uri: &str,
        mut surface: S,
        transport: Arc<dyn Transport>,
        codec: Arc<dyn RdfCodec>,
        session: SessionContext,
        config: EditorConfig,
    ) -> Result<Self> {
        url::Url::parse(uri)?;
        let uri = uri.to_string();
        let elements = build_pane(&mut surface, &config);

        let mut editor = SourceEditor {
            machine: EditorStateMachine::new(uri.ends_with('/')),
            persistence: PersistenceController::new(transport, session.clone()),
            validator: SyntaxValidator::new(Arc::clone(&codec), session.clone()),
            compactor: CompactTransform::new(codec, session),
            uri,
            surface,
            config,
            elements,
            metadata: ResourceMetadata::default(),
            buffer: EditBuffer::default(),
        };
        editor.render();
        Ok(editor)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn state(&self) -> EditorState {
        self.machine.state()
    }

    pub fn machine(&self) -> &EditorStateMachine {
        &self.machine
    }

    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn elements(&self) -> &PaneElements {
        &self.elements
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Load the resource and show it.
    pub async fn open(&mut self) -> Result<()> {
        self.reload().await
    }

    /// Fetch the resource again, discarding local edits.
    ///
    /// A failed read, or a read with no determinable content type, leaves the
    /// session `broken`.
    pub async fn reload(&mut self) -> Result<()> {
        let loaded = match self.persistence.load(&self.uri).await {
            Ok(loaded) => loaded,
            Err(e) => {
                self.machine.mark_broken();
                self.render();
                return Err(self.report(e, "Error reading file: "));
            }
        };

        self.show_text(&loaded.body);
        self.buffer = EditBuffer::loaded(loaded.body);
        self.metadata = loaded.metadata;

        if self.metadata.content_type.is_none() {
            tracing::warn!("No content type available for {}", self.uri);
            self.machine.mark_broken();
            self.render();
            return Err(self.report(EditorError::UndeterminedType, ""));
        }

        self.machine
            .configure(self.metadata.writable(), self.metadata.compactable());
        self.machine.mark_unedited();
        self.render();
        tracing::info!(
            "Opened {} as {:?} (writable: {})",
            self.uri,
            self.metadata.content_type,
            self.metadata.writable()
        );
        Ok(())
    }

    /// Dispatch user input.
    pub async fn handle_event(&mut self, event: EditorEvent) -> Result<()> {
        match event {
            EditorEvent::EditClicked => {
                let result = self.machine.begin_edit();
                self.render();
                result
            }
            EditorEvent::KeyUp => {
                self.on_keystroke();
                Ok(())
            }
            EditorEvent::SaveClicked => self.save().await,
            EditorEvent::CancelClicked => self.cancel().await,
            EditorEvent::CompactClicked => self.compact().await,
        }
    }

    /// Pick up the text area contents after a keystroke.
    fn on_keystroke(&mut self) {
        if !self.machine.mark_modified() {
            return;
        }
        let text = self.surface.value(self.elements.text_area);
        self.buffer.replace(text);
        self.render();
    }

    /// Validate the buffer and write it back.
    ///
    /// Nothing is written when validation fails. On success the session
    /// returns to `unedited` with the refreshed metadata.
    pub async fn save(&mut self) -> Result<()> {
        if !self.machine.can_save() {
            return Err(EditorError::InvalidTransition {
                state: self.machine.state(),
                action: "save",
            });
        }
        let text = self.surface.value(self.elements.text_area);
        self.buffer.text = text.clone();
        self.clear_status();

        if let Err(e) = self
            .validator
            .validate(&text, self.metadata.content_type.as_deref(), &self.uri)
            .await
        {
            if let Some(position) = e.source_position() {
                let offset = caret_offset(&text, position);
                self.surface.set_caret(self.elements.text_area, offset);
            }
            self.machine.flag_invalid();
            self.render();
            return Err(self.report(e, ""));
        }

        let saved = self
            .persistence
            .save(
                &self.uri,
                &text,
                self.metadata.content_type.as_deref(),
                self.metadata.entity_tag.as_deref(),
            )
            .await;

        match saved {
            Ok(refreshed) => {
                self.metadata.supersede(refreshed);
                self.buffer.mark_clean();
                self.machine
                    .configure(self.metadata.writable(), self.metadata.compactable());
                self.machine.mark_unedited();
                self.render();
                Ok(())
            }
            Err(e @ EditorError::Refresh(_)) => {
                // the write itself went through
                self.buffer.mark_clean();
                Err(self.report(e, "Error saving back: "))
            }
            Err(e) => Err(self.report(e, "Error saving back: ")),
        }
    }

    /// Discard local changes by reloading from the server.
    pub async fn cancel(&mut self) -> Result<()> {
        if !self.machine.can_cancel() {
            return Err(EditorError::InvalidTransition {
                state: self.machine.state(),
                action: "cancel",
            });
        }
        self.reload().await
    }

    /// Replace the buffer with its canonical serialization.
    ///
    /// Only offered while `unedited`; the buffer is untouched on failure.
    pub async fn compact(&mut self) -> Result<()> {
        if !self.machine.can_compact() {
            return Err(EditorError::InvalidTransition {
                state: self.machine.state(),
                action: "compact",
            });
        }
        let compacted = self
            .compactor
            .compact(
                &self.buffer.text,
                self.metadata.content_type.as_deref(),
                &self.uri,
            )
            .await;

        match compacted {
            Ok(Some(text)) => {
                self.show_text(&text);
                self.buffer.replace(text);
                self.machine.note_compacted();
                self.render();
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => Err(self.report(e, "")),
        }
    }

    fn show_text(&mut self, text: &str) {
        let text_area = self.elements.text_area;
        let rows = self.config.rows_for(text).to_string();
        let cols = self.config.columns.to_string();
        self.surface.set_attribute(text_area, "rows", &rows);
        self.surface.set_attribute(text_area, "cols", &cols);
        self.surface.set_value(text_area, text);
    }

    fn clear_status(&mut self) {
        self.surface.clear_children(self.elements.status);
    }

    /// Render `err` in the status row and hand it back.
    fn report(&mut self, err: EditorError, transport_prefix: &str) -> EditorError {
        let message = match err {
            EditorError::Transport { .. } => format!("{}{}", transport_prefix, err),
            _ => err.to_string(),
        };
        tracing::warn!("{}: {}", self.uri, message);
        let block = error_block(&mut self.surface, &message);
        self.surface.append_child(self.elements.status, block);
        err
    }

    /// Apply control visibility, text tone and read-only state.
    fn render(&mut self) {
        let controls = self.machine.controls();
        let els = self.elements;
        for (element, visible) in [
            (els.edit, controls.edit),
            (els.compact, controls.compact),
            (els.save, controls.save),
            (els.cancel, controls.cancel),
        ] {
            let visibility = if visible { "visible" } else { "collapse" };
            self.surface.set_style(element, "visibility", visibility);
        }

        let color = self.config.tones.color(self.machine.tone()).to_string();
        self.surface.set_style(els.text_area, "color", &color);
        if self.machine.buffer_mutable() {
            self.surface.remove_attribute(els.text_area, "readonly");
        } else {
            self.surface.set_attribute(els.text_area, "readonly", "true");
        }
    }
}

fn build_pane<S: RenderSurface>(surface: &mut S, config: &EditorConfig) -> PaneElements {
    let root = surface.create_element("div");
    surface.set_attribute(root, "class", "sourcePane");
    let table = surface.create_element("table");
    surface.append_child(root, table);

    let main = surface.create_element("tr");
    let status = surface.create_element("tr");
    let controls = surface.create_element("tr");
    surface.set_style(controls, "text-align", "right");
    for row in [main, status, controls] {
        surface.append_child(table, row);
    }

    let text_area = surface.create_element("textarea");
    surface.set_attribute(text_area, "style", &config.edit_style);
    surface.append_child(main, text_area);
    surface.add_event_listener(text_area, EventKind::KeyUp, EditorEvent::KeyUp);

    let mut control = |label: &str, event: EditorEvent| {
        let element = button(&mut *surface, label);
        surface.append_child(controls, element);
        surface.add_event_listener(element, EventKind::Click, event);
        element
    };
    let compact = control("Compact", EditorEvent::CompactClicked);
    let cancel = control("Cancel", EditorEvent::CancelClicked);
    let save = control("Save", EditorEvent::SaveClicked);
    let edit = control("Edit", EditorEvent::EditClicked);

    PaneElements {
        root,
        status,
        text_area,
        compact,
        cancel,
        save,
        edit,
    }
}
