#![doc = include_str!("../README.md")]

//! # Source editing for remote resources
//!
//! This crate edits the raw text of a remote resource in place. It loads the
//! resource over HTTP, checks every edit against the resource's declared
//! content type before writing, and writes back with `If-Match` so a change
//! made by someone else in the meantime is detected instead of overwritten.
//!
//! ## Overview
//!
//! 1. **Load** - `GET` the resource, read content type, `Allow` and `ETag`
//! 2. **Edit** - the pane unlocks the buffer and tracks modifications
//! 3. **Validate** - JSON, RDF (via a pluggable codec) and HTML data islands
//! 4. **Save** - conditional `PUT`, then `HEAD` to pick up the new entity tag
//!
//! ## Status Codes
//!
//! - `2xx` - success
//! - `412 Precondition Failed` on `PUT` - the resource changed since it was read
//! - anything else - reported with the method that produced it
//!
//! ## Usage
//!
//! ```ignore
//! use source_editor::editor::{EditorConfig, EditorEvent, MemorySurface, SourceEditor};
//! use source_editor::{HttpClient, SessionContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut editor = SourceEditor::new(
//!         "https://example.org/profile/card.ttl",
//!         MemorySurface::new(),
//!         Arc::new(HttpClient::new()?),
//!         Arc::new(MyTurtleCodec::default()),
//!         SessionContext::new(),
//!         EditorConfig::default(),
//!     )?;
//!     editor.open().await?;
//!
//!     editor.handle_event(EditorEvent::EditClicked).await?;
//!     let text_area = editor.elements().text_area;
//!     editor.surface_mut().set_value(text_area, "<#me> a <#Person> .");
//!     editor.handle_event(EditorEvent::KeyUp).await?;
//!     editor.handle_event(EditorEvent::SaveClicked).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - requests, responses and resource metadata
//! - **[error]** - error types and result handling
//! - **[protocol]** - headers, content-type families, data islands, caret positions
//! - **[client]** - the `Transport` seam and its `reqwest` implementation
//! - **[store]** - the statement graph and the shared session context
//! - **[codec]** - the RDF parser/serializer seam
//! - **[validate]**, **[compact]**, **[persistence]** - the operations behind the pane
//! - **[editor]** - the state machine, rendering surface and pane

pub mod client;
pub mod codec;
pub mod compact;
pub mod editor;
pub mod error;
pub mod persistence;
pub mod protocol;
pub mod store;
pub mod types;
pub mod validate;

pub use client::{ClientConfig, HttpClient, Transport};
pub use codec::RdfCodec;
pub use compact::CompactTransform;
pub use editor::{EditorConfig, EditorEvent, EditorState, SourceEditor};
pub use error::{Character, EditorError, Result, SourcePosition, SyntaxError};
pub use persistence::{LoadedResource, PersistenceController};
pub use protocol::ContentTypeFamily;
pub use store::{Graph, SessionContext, Term};
pub use types::{ResourceMetadata, WebRequest, WebResponse};
pub use validate::SyntaxValidator;
