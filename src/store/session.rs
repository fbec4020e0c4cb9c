//! Shared state for every editing session opened by one host.
//!
//! A [`SessionContext`] owns the parsed-statement graph, the cache of
//! resources already requested, and the set of resources with a save in
//! flight. Clones share the same state, so one context can be handed to many
//! editors and the components behind them.

use super::graph::{vocab, Graph, Term};
use crate::error::{EditorError, Result};
use crate::protocol::headers;
use crate::types::ResourceMetadata;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    graph: RwLock<Graph>,
    requested: RwLock<HashSet<String>>,
    in_flight: Mutex<HashSet<String>>,
}

/// Handle to the graph and request cache shared between sessions.
///
/// # Thread Safety
///
/// All state lives behind `parking_lot` locks inside an `Arc`. No lock is held
/// across an `.await`: async callers take snapshots with
/// [`SessionContext::document`] instead.
///
/// # Examples
///
/// ```
/// use source_editor::store::{SessionContext, Term};
///
/// let session = SessionContext::new();
/// let doc = "https://example.org/a.ttl";
/// session.with_graph_mut(|g| {
///     g.add(Term::named(doc), Term::named("http://example.org/p"), Term::literal("x"), doc)
/// });
/// assert_eq!(session.remove_document(doc), 1);
/// ```
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Graph ==========

    /// Run `f` with shared access to the graph.
    pub fn with_graph<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&self.inner.graph.read())
    }

    /// Run `f` with exclusive access to the graph.
    pub fn with_graph_mut<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.inner.graph.write())
    }

    /// Copy of the statements read from `uri`.
    pub fn document(&self, uri: &str) -> Graph {
        self.inner.graph.read().document(uri)
    }

    /// Drop the statements read from `uri`. Other documents are untouched.
    pub fn remove_document(&self, uri: &str) -> usize {
        let removed = self.inner.graph.write().remove_document(uri);
        if removed > 0 {
            tracing::debug!("Removed {} statements from {}", removed, uri);
        }
        removed
    }

    // ========== Request cache ==========

    pub fn mark_requested(&self, uri: &str) {
        self.inner.requested.write().insert(uri.to_string());
    }

    pub fn is_requested(&self, uri: &str) -> bool {
        self.inner.requested.read().contains(uri)
    }

    /// Clear the "already requested" marker so the resource is fetched again.
    pub fn forget_request(&self, uri: &str) -> bool {
        self.inner.requested.write().remove(uri)
    }

    /// Record the headers of a response in the graph.
    ///
    /// Writes `<uri> link:requestedURI "uri"`, links a fresh response node to
    /// it with `link:response`, and stores each header value under
    /// `httph:<name>`. Earlier records for `uri` are replaced.
    pub fn record_response(&self, uri: &str, response_headers: &BTreeMap<String, String>) {
        let request = Term::named(uri);
        let response = Term::blank(format!("response:{}", uri));
        let provenance = request_document(uri);

        let mut graph = self.inner.graph.write();
        graph.remove_document(&provenance);
        graph.add(
            request.clone(),
            Term::named(vocab::LINK_REQUESTED_URI),
            Term::literal(uri),
            provenance.as_str(),
        );
        graph.add(
            request,
            Term::named(vocab::LINK_RESPONSE),
            response.clone(),
            provenance.as_str(),
        );
        for (name, value) in response_headers {
            graph.add(
                response.clone(),
                Term::named(vocab::httph(name)),
                Term::literal(value.as_str()),
                provenance.as_str(),
            );
        }
    }

    /// Metadata recorded for `uri` by an earlier response, if any.
    ///
    /// Finds the request whose `link:requestedURI` is `uri`, follows its
    /// `link:response`, and reads the content type, allow-list and entity tag
    /// from the stored headers. Returns `None` unless a content type is found.
    pub fn fallback_metadata(&self, uri: &str) -> Option<ResourceMetadata> {
        let graph = self.inner.graph.read();
        let requests = graph.each_subject(
            &Term::named(vocab::LINK_REQUESTED_URI),
            &Term::literal(uri),
        );
        requests.iter().find_map(|request| {
            let response = graph.any_object(request, &Term::named(vocab::LINK_RESPONSE))?;
            let header = |name: &str| graph.any_value(response, &Term::named(vocab::httph(name)));
            let content_type = header(headers::CONTENT_TYPE)?;
            let meta = ResourceMetadata::from_values(
                Some(content_type),
                header(headers::ALLOW),
                header(headers::ETAG),
            );
            meta.content_type.is_some().then_some(meta)
        })
    }

    // ========== Saves ==========

    /// Claim the right to save `uri`.
    ///
    /// Fails with [`EditorError::SaveInFlight`] while another guard for the
    /// same resource is alive. The claim is released when the guard drops.
    pub fn begin_save(&self, uri: &str) -> Result<SaveGuard> {
        let mut in_flight = self.inner.in_flight.lock();
        if !in_flight.insert(uri.to_string()) {
            tracing::warn!("Save already in flight for {}", uri);
            return Err(EditorError::SaveInFlight(uri.to_string()));
        }
        Ok(SaveGuard {
            inner: Arc::clone(&self.inner),
            uri: uri.to_string(),
        })
    }

    pub fn save_in_flight(&self, uri: &str) -> bool {
        self.inner.in_flight.lock().contains(uri)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("statements", &self.inner.graph.read().len())
            .field("requested", &self.inner.requested.read().len())
            .field("in_flight", &self.inner.in_flight.lock().len())
            .finish()
    }
}

/// Exclusive claim on saving one resource. Released on drop.
#[must_use = "the save claim is released as soon as the guard is dropped"]
pub struct SaveGuard {
    inner: Arc<Inner>,
    uri: String,
}

impl SaveGuard {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.inner.in_flight.lock().remove(&self.uri);
    }
}

/// Provenance used for response bookkeeping, kept apart from the parsed document.
fn request_document(uri: &str) -> String {
    format!("{}#request", uri)
}
