//! Reading and conditionally writing back one resource.
//!
//! # Save Sequence
//!
//! ```text
//! begin_save(uri)  ── SaveInFlight if another save is running
//!      │
//! PUT  (if-match: <etag>)  ── 412 → Conflict, other status → Status
//!      │
//! HEAD                     ── failure → Refresh (the write stands)
//!      │
//! new metadata
//! ```

use crate::client::{check_status, Transport};
use crate::error::{EditorError, Result};
use crate::protocol::headers;
use crate::store::SessionContext;
use crate::types::{ResourceMetadata, WebRequest, WebResponse};
use bytes::Bytes;
use http::Method;
use std::sync::Arc;

/// A successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedResource {
    pub body: String,
    /// `content_type` is `None` when neither the headers nor the session knew it
    pub metadata: ResourceMetadata,
}

/// Orchestrates GET, conditional PUT and the follow-up HEAD for a resource.
#[derive(Clone)]
pub struct PersistenceController {
    transport: Arc<dyn Transport>,
    session: SessionContext,
}

impl PersistenceController {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        PersistenceController { transport, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Read `uri`.
    ///
    /// A missing or empty body is an error: the editor never shows an empty
    /// buffer in place of content it could not read.
    pub async fn load(&self, uri: &str) -> Result<LoadedResource> {
        tracing::debug!("GET {}", uri);
        let response = self.transport.web_operation(uri, WebRequest::get()).await?;
        check_status(&Method::GET, &response)?;

        let body = match response.response_text() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                tracing::warn!("No text in response for {}", uri);
                return Err(EditorError::MissingBody);
            }
        };

        let metadata = self.metadata_for(uri, &response);
        if metadata.allowed_methods.is_none() {
            tracing::warn!("No Allow header from this server for {}", uri);
        }
        if metadata.entity_tag.is_none() {
            tracing::debug!("No ETag on GET {}", uri);
        }
        self.session.mark_requested(uri);

        Ok(LoadedResource { body, metadata })
    }

    /// Write `body` back to `uri`, then re-read its metadata.
    ///
    /// A known `entity_tag` is sent as `If-Match`, so a write racing another
    /// writer fails with [`EditorError::Conflict`]. If the write succeeds but
    /// the follow-up HEAD fails, the result is [`EditorError::Refresh`]; the
    /// write is not undone.
    pub async fn save(
        &self,
        uri: &str,
        body: &str,
        content_type: Option<&str>,
        entity_tag: Option<&str>,
    ) -> Result<ResourceMetadata> {
        let _guard = self.session.begin_save(uri)?;

        let mut request = WebRequest::new(Method::PUT);
        request.body = Some(Bytes::from(body.to_string()));
        request.content_type = content_type.map(str::to_string);
        if let Some(etag) = entity_tag {
            request = request.with_if_match(etag);
        }

        tracing::debug!("PUT {} (if-match: {:?})", uri, entity_tag);
        let response = self.transport.web_operation(uri, request).await?;
        check_status(&Method::PUT, &response)?;

        let metadata = self
            .refresh_metadata(uri)
            .await
            .map_err(|e| EditorError::Refresh(Box::new(e)))?;
        tracing::info!("Saved {} (etag now {:?})", uri, metadata.entity_tag);
        Ok(metadata)
    }

    /// Re-read the metadata of `uri` with a HEAD request.
    ///
    /// The entity tag always comes from this response, never from an earlier
    /// record, since the write just made any recorded tag stale.
    pub async fn refresh_metadata(&self, uri: &str) -> Result<ResourceMetadata> {
        tracing::debug!("HEAD {}", uri);
        let response = self.transport.web_operation(uri, WebRequest::head()).await?;
        check_status(&Method::HEAD, &response)?;

        let mut metadata = self.metadata_for(uri, &response);
        metadata.entity_tag = ResourceMetadata::from_values(None, None, response.etag()).entity_tag;
        if response.content_type().is_none() {
            if let Some(content_type) = &metadata.content_type {
                let mut recorded = response.headers.clone();
                recorded.insert(headers::CONTENT_TYPE.to_string(), content_type.clone());
                self.session.record_response(uri, &recorded);
            }
        }
        Ok(metadata)
    }

    /// Metadata from the response headers.
    ///
    /// Without a content type in the headers, the session's record supplies it
    /// along with any header this response left out.
    fn metadata_for(&self, uri: &str, response: &WebResponse) -> ResourceMetadata {
        if let Some(metadata) = ResourceMetadata::from_response(response) {
            self.session.record_response(uri, &response.headers);
            return metadata;
        }
        let observed = ResourceMetadata::from_values(None, response.allow(), response.etag());
        match self.session.fallback_metadata(uri) {
            Some(recorded) => ResourceMetadata {
                content_type: recorded.content_type,
                allowed_methods: observed.allowed_methods.or(recorded.allowed_methods),
                entity_tag: observed.entity_tag.or(recorded.entity_tag),
            },
            None => {
                tracing::debug!("No content type for {} in headers or session", uri);
                observed
            }
        }
    }
}
