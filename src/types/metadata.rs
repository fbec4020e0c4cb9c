//! Metadata observed for a resource on read and after each save.

use crate::protocol::{self, ContentTypeFamily};
use crate::types::WebResponse;
use http::Method;

/// What the server told us about a resource.
///
/// # Invariants
///
/// - `content_type` holds a bare media type, parameters already stripped
/// - an observed `entity_tag` is attached to the next save as `If-Match`
/// - metadata refreshed after a save always replaces the previous entity tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub content_type: Option<String>,
    pub allowed_methods: Option<Vec<Method>>,
    pub entity_tag: Option<String>,
}

impl ResourceMetadata {
    /// Read metadata from response headers.
    ///
    /// Returns `None` when the response carries no content type, in which case
    /// the headers are not trusted and the caller falls back to the session cache.
    pub fn from_response(response: &WebResponse) -> Option<Self> {
        let content_type = response.content_type()?;
        Some(Self::from_values(
            Some(content_type),
            response.allow(),
            response.etag(),
        ))
    }

    /// Build metadata from raw header values.
    pub fn from_values(
        content_type: Option<&str>,
        allow: Option<&str>,
        etag: Option<&str>,
    ) -> Self {
        ResourceMetadata {
            content_type: content_type
                .map(protocol::media_type)
                .filter(|ct| !ct.is_empty()),
            allowed_methods: allow.map(protocol::parse_allow),
            entity_tag: etag.filter(|e| !e.is_empty()).map(str::to_string),
        }
    }

    /// Whether the server permits writing the resource.
    ///
    /// Without an allow-list the answer is `true`; with one it is exactly
    /// whether `PUT` is listed.
    pub fn writable(&self) -> bool {
        match &self.allowed_methods {
            Some(methods) => methods.contains(&Method::PUT),
            None => true,
        }
    }

    pub fn family(&self) -> ContentTypeFamily {
        ContentTypeFamily::classify(self.content_type.as_deref())
    }

    pub fn compactable(&self) -> bool {
        self.family().is_compactable()
    }

    /// Merge metadata read after a save into what we already knew.
    ///
    /// The entity tag and allow-list are always replaced. The content type is
    /// only replaced when the newer read reported one.
    pub fn supersede(&mut self, newer: ResourceMetadata) {
        self.entity_tag = newer.entity_tag;
        self.allowed_methods = newer.allowed_methods;
        if newer.content_type.is_some() {
            self.content_type = newer.content_type;
        }
    }
}
