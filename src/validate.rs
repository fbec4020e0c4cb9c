//! Syntax checks run on a buffer before it is written back.
//!
//! | Family | Check |
//! |--------|-------|
//! | `None` | always accepted |
//! | `CompositeHtml` | first data island checked as its own type, else accepted |
//! | `Json` | `serde_json` parse |
//! | `RdfJsonLd` | JSON parse, RDF parse, then identifier expansion check |
//! | other RDF | RDF parse into the session graph |

use crate::codec::RdfCodec;
use crate::error::{EditorError, Result, SyntaxError};
use crate::protocol::{extract_data_island, media_type, ContentTypeFamily};
use crate::store::{Graph, SessionContext};
use std::sync::Arc;

/// Validates buffers against their declared content type.
///
/// RDF buffers are parsed into the session graph. Statements previously read
/// from the same resource are dropped first, and its "requested" marker is
/// cleared, so repeated validations never accumulate duplicates.
#[derive(Clone)]
pub struct SyntaxValidator {
    codec: Arc<dyn RdfCodec>,
    session: SessionContext,
}

impl SyntaxValidator {
    pub fn new(codec: Arc<dyn RdfCodec>, session: SessionContext) -> Self {
        SyntaxValidator { codec, session }
    }

    /// Check `buffer` as `content_type`, resolving relative IRIs against `base_uri`.
    ///
    /// Fails with [`EditorError::Syntax`] when the buffer does not parse and
    /// [`EditorError::SemanticValidation`] when a JSON-LD buffer parses but
    /// loses its identifiers.
    pub async fn validate(
        &self,
        buffer: &str,
        content_type: Option<&str>,
        base_uri: &str,
    ) -> Result<()> {
        let mut family = ContentTypeFamily::classify(content_type);
        let mut text = buffer;
        let mut declared = content_type.map(media_type).unwrap_or_default();

        let island = if family == ContentTypeFamily::CompositeHtml {
            match extract_data_island(buffer) {
                Some(found) => Some(found),
                None => {
                    tracing::debug!("No data island in {}, nothing to check", base_uri);
                    return Ok(());
                }
            }
        } else {
            None
        };
        if let Some(found) = &island {
            tracing::debug!("Checking {} data island in {}", found.content_type, base_uri);
            family = found.family();
            text = &found.text;
            declared = found.content_type.to_string();
        }

        let outcome = match family {
            ContentTypeFamily::None | ContentTypeFamily::CompositeHtml => Ok(()),
            ContentTypeFamily::Json => check_json(text),
            ContentTypeFamily::RdfJsonLd => {
                check_json(text)?;
                let parsed = self.parse_into_session(text, base_uri, &declared)?;
                self.check_identifiers(text, &parsed, base_uri, &declared)
                    .await
            }
            _ => self
                .parse_into_session(text, base_uri, &declared)
                .map(|_| ()),
        };

        // island positions are relative to the island text
        match &island {
            Some(found) => outcome.map_err(|e| match e {
                EditorError::Syntax(err) => {
                    EditorError::Syntax(err.embedded_at(found.start_line, found.start_column))
                }
                other => other,
            }),
            None => outcome,
        }
    }

    /// Replace the statements of `base_uri` in the session with those parsed from `text`.
    ///
    /// Returns the freshly parsed statements.
    fn parse_into_session(&self, text: &str, base_uri: &str, content_type: &str) -> Result<Graph> {
        self.session.remove_document(base_uri);
        self.session.forget_request(base_uri);

        let mut parsed = Graph::new();
        self.codec
            .parse(text, &mut parsed, base_uri, content_type)
            .map_err(|e| {
                tracing::debug!("{} does not parse as {}: {}", base_uri, content_type, e);
                e
            })?;
        self.session
            .with_graph_mut(|graph| graph.extend(parsed.iter().cloned()));
        Ok(parsed)
    }

    /// Shorthand identifiers must survive a parse and re-serialize.
    async fn check_identifiers(
        &self,
        source: &str,
        parsed: &Graph,
        base_uri: &str,
        content_type: &str,
    ) -> Result<()> {
        if !source.contains("@id") {
            return Ok(());
        }
        let serialized = self
            .codec
            .serialize(base_uri, parsed, base_uri, content_type)
            .await?;
        if serialized.contains("@id") {
            Ok(())
        } else {
            Err(EditorError::SemanticValidation(
                "predicate does not expand to an absolute IRI".to_string(),
            ))
        }
    }
}

fn check_json(text: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|_| ())
        .map_err(|e| EditorError::Syntax(SyntaxError::from(e)))
}
