//! Re-serialization of a buffer into canonical form.

use crate::codec::RdfCodec;
use crate::error::Result;
use crate::protocol::ContentTypeFamily;
use crate::store::{Graph, SessionContext};
use std::sync::Arc;

/// Parses a buffer and writes it back out through the codec.
///
/// Only Turtle, N3 and JSON-LD are compacted. On parse failure the error is
/// returned and the caller keeps its buffer as it was.
#[derive(Clone)]
pub struct CompactTransform {
    codec: Arc<dyn RdfCodec>,
    session: SessionContext,
}

impl CompactTransform {
    pub fn new(codec: Arc<dyn RdfCodec>, session: SessionContext) -> Self {
        CompactTransform { codec, session }
    }

    /// Canonical form of `buffer`, or `None` when `content_type` is not compactable.
    ///
    /// The result is only produced once serialization has finished.
    pub async fn compact(
        &self,
        buffer: &str,
        content_type: Option<&str>,
        resource_uri: &str,
    ) -> Result<Option<String>> {
        let family = ContentTypeFamily::classify(content_type);
        let media_type = match family.rdf_media_type() {
            Some(media_type) if family.is_compactable() => media_type,
            _ => {
                tracing::debug!("{} is not compactable ({})", resource_uri, family);
                return Ok(None);
            }
        };

        self.session.remove_document(resource_uri);
        self.session.forget_request(resource_uri);

        let mut parsed = Graph::new();
        self.codec
            .parse(buffer, &mut parsed, resource_uri, media_type)?;
        self.session
            .with_graph_mut(|graph| graph.extend(parsed.iter().cloned()));

        let snapshot = self.session.document(resource_uri);
        let serialized = self
            .codec
            .serialize(resource_uri, &snapshot, resource_uri, media_type)
            .await?;
        tracing::debug!(
            "Compacted {} ({} statements, {} -> {} bytes)",
            resource_uri,
            snapshot.len(),
            buffer.len(),
            serialized.len()
        );
        Ok(Some(serialized))
    }
}
