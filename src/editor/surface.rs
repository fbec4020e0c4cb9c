//! The rendering surface the pane draws on.
//!
//! The pane never talks to a concrete toolkit. It builds its tree through
//! [`RenderSurface`] and hosts route user input back as [`EditorEvent`]s.
//! [`MemorySurface`] is an in-memory tree used by headless hosts and tests.
//!
//! Invariants:
//! - Element ids are only valid for the surface that created them.
//! - Callers append each node to at most one parent.
//! - Attribute and style names are ASCII-lowercase.

use std::collections::BTreeMap;

/// Handle to an element created by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Kinds of user input the pane listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyUp,
}

/// Input delivered to [`SourceEditor::handle_event`](super::SourceEditor::handle_event).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorEvent {
    EditClicked,
    /// A key was released in the text area
    KeyUp,
    SaveClicked,
    CancelClicked,
    CompactClicked,
}

/// Minimal tree-construction API.
pub trait RenderSurface: Send {
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    /// Set one inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Replace the text content of `element`.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Current value of a form control.
    fn value(&self, element: ElementId) -> String;

    fn set_value(&mut self, element: ElementId, value: &str);

    /// Deliver `event` when `kind` happens on `element`.
    fn add_event_listener(&mut self, element: ElementId, kind: EventKind, event: EditorEvent);

    fn clear_children(&mut self, element: ElementId);

    /// Move the text cursor of a form control to a character offset.
    fn set_caret(&mut self, element: ElementId, offset: usize);
}

/// A labelled button.
pub fn button<S: RenderSurface + ?Sized>(surface: &mut S, label: &str) -> ElementId {
    let button = surface.create_element("button");
    surface.set_attribute(button, "type", "button");
    surface.set_attribute(button, "title", label);
    surface.set_text(button, label);
    button
}

/// An inline error message.
pub fn error_block<S: RenderSurface + ?Sized>(surface: &mut S, message: &str) -> ElementId {
    let block = surface.create_element("div");
    surface.set_attribute(block, "class", "errorMessageBlock");
    surface.set_style(block, "color", "red");
    surface.set_text(block, message);
    block
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    caret: Option<usize>,
    children: Vec<ElementId>,
    listeners: Vec<(EventKind, EditorEvent)>,
}

/// Arena-backed [`RenderSurface`].
///
/// Operations on ids the surface never issued are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.node(id)?.style.get(property).map(String::as_str)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn caret(&self, id: ElementId) -> Option<usize> {
        self.node(id)?.caret
    }

    /// Text of `id` followed by the text of its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        if let Some(node) = self.node(id) {
            out.push_str(&node.text);
            for child in &node.children {
                self.collect_text(*child, out);
            }
        }
    }

    /// First element whose `title` attribute is `title`.
    pub fn find_by_title(&self, title: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.attributes.get("title").map(String::as_str) == Some(title))
            .map(|i| ElementId(i as u32))
    }

    /// Whether `id` is visible, judged by its `visibility` style.
    pub fn is_visible(&self, id: ElementId) -> bool {
        !matches!(self.style(id, "visibility"), Some("collapse") | Some("hidden"))
    }

    /// The event a listener on `id` maps `kind` to.
    pub fn fire(&self, id: ElementId, kind: EventKind) -> Option<EditorEvent> {
        self.node(id)?
            .listeners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, event)| *event)
    }
}

impl RenderSurface for MemorySurface {
    fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.node(child).is_none() {
            return;
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.remove(&name.to_ascii_lowercase());
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.style
                .insert(property.to_ascii_lowercase(), value.to_string());
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
        }
    }

    fn value(&self, element: ElementId) -> String {
        self.node(element)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.value = value.to_string();
        }
    }

    fn add_event_listener(&mut self, element: ElementId, kind: EventKind, event: EditorEvent) {
        if let Some(node) = self.node_mut(element) {
            node.listeners.push((kind, event));
        }
    }

    fn clear_children(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.children.clear();
        }
    }

    fn set_caret(&mut self, element: ElementId, offset: usize) {
        if let Some(node) = self.node_mut(element) {
            node.caret = Some(offset);
        }
    }
}
