//! The seam to the RDF parser and serializer engines.
//!
//! The editor never parses RDF itself. Hosts supply an [`RdfCodec`] that
//! reads a buffer into the session graph and writes a graph back out in a
//! given media type.

use crate::error::SyntaxError;
use crate::store::Graph;
use async_trait::async_trait;

/// Parser and serializer for the RDF media types the editor understands.
///
/// # Contract
///
/// - `parse` adds every statement it reads to `graph`, tagged with
///   `base_uri` as the document, and adds nothing when it fails
/// - `serialize` writes only the statements it is given; output for the same
///   graph must be identical on every call so compaction is idempotent
#[async_trait]
pub trait RdfCodec: Send + Sync {
    /// Parse `text` of `content_type` relative to `base_uri` into `graph`.
    fn parse(
        &self,
        text: &str,
        graph: &mut Graph,
        base_uri: &str,
        content_type: &str,
    ) -> Result<(), SyntaxError>;

    /// Serialize `graph` with `subject` as the document node.
    ///
    /// May suspend; callers hold no locks across this call.
    async fn serialize(
        &self,
        subject: &str,
        graph: &Graph,
        base_uri: &str,
        content_type: &str,
    ) -> Result<String, SyntaxError>;
}
