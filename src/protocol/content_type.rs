//! Classification of content types into syntax families.
//!
//! | Media type | Family | Compactable |
//! |------------|--------|-------------|
//! | `text/turtle` | `RdfTurtle` | yes |
//! | `text/n3` | `RdfN3` | yes |
//! | `application/ld+json` | `RdfJsonLd` | yes |
//! | `application/rdf+xml` | `RdfXml` | no |
//! | `application/xhtml+xml` | `RdfXhtml` | no |
//! | `application/json`, other `*+json` | `Json` | no |
//! | `text/html` | `CompositeHtml` | no |
//! | anything else, or absent | `None` | no |

use super::headers::media_type;
use std::fmt;

/// The syntax family a content type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTypeFamily {
    /// Not understood; never validated
    None,
    Json,
    RdfTurtle,
    RdfN3,
    RdfXml,
    RdfJsonLd,
    RdfXhtml,
    /// HTML that may carry an embedded data island
    CompositeHtml,
}

impl ContentTypeFamily {
    /// Classify a raw content type, parameters included.
    ///
    /// # Examples
    ///
    /// ```
    /// use source_editor::protocol::ContentTypeFamily;
    ///
    /// assert_eq!(ContentTypeFamily::classify(Some("text/turtle;charset=utf-8")), ContentTypeFamily::RdfTurtle);
    /// assert_eq!(ContentTypeFamily::classify(Some("application/activity+json")), ContentTypeFamily::Json);
    /// assert_eq!(ContentTypeFamily::classify(None), ContentTypeFamily::None);
    /// ```
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return ContentTypeFamily::None;
        };
        match media_type(raw).as_str() {
            "text/turtle" => ContentTypeFamily::RdfTurtle,
            "text/n3" => ContentTypeFamily::RdfN3,
            "application/rdf+xml" => ContentTypeFamily::RdfXml,
            "application/ld+json" => ContentTypeFamily::RdfJsonLd,
            "application/xhtml+xml" => ContentTypeFamily::RdfXhtml,
            "text/html" => ContentTypeFamily::CompositeHtml,
            "application/json" => ContentTypeFamily::Json,
            other if other.ends_with("+json") => ContentTypeFamily::Json,
            _ => ContentTypeFamily::None,
        }
    }

    /// Whether compaction is offered for this family.
    #[inline]
    pub fn is_compactable(self) -> bool {
        matches!(
            self,
            ContentTypeFamily::RdfTurtle | ContentTypeFamily::RdfN3 | ContentTypeFamily::RdfJsonLd
        )
    }

    /// Whether buffers of this family go through the RDF parser.
    #[inline]
    pub fn is_rdf(self) -> bool {
        matches!(
            self,
            ContentTypeFamily::RdfTurtle
                | ContentTypeFamily::RdfN3
                | ContentTypeFamily::RdfXml
                | ContentTypeFamily::RdfJsonLd
                | ContentTypeFamily::RdfXhtml
        )
    }

    /// Canonical media type handed to the RDF parser, for RDF families.
    pub fn rdf_media_type(self) -> Option<&'static str> {
        match self {
            ContentTypeFamily::RdfTurtle => Some("text/turtle"),
            ContentTypeFamily::RdfN3 => Some("text/n3"),
            ContentTypeFamily::RdfXml => Some("application/rdf+xml"),
            ContentTypeFamily::RdfJsonLd => Some("application/ld+json"),
            ContentTypeFamily::RdfXhtml => Some("application/xhtml+xml"),
            _ => None,
        }
    }
}

impl fmt::Display for ContentTypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentTypeFamily::None => "none",
            ContentTypeFamily::Json => "json",
            ContentTypeFamily::RdfTurtle => "turtle",
            ContentTypeFamily::RdfN3 => "n3",
            ContentTypeFamily::RdfXml => "rdf+xml",
            ContentTypeFamily::RdfJsonLd => "json-ld",
            ContentTypeFamily::RdfXhtml => "xhtml",
            ContentTypeFamily::CompositeHtml => "html",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_types() {
        assert_eq!(ContentTypeFamily::classify(Some("text/turtle")), ContentTypeFamily::RdfTurtle);
        assert_eq!(ContentTypeFamily::classify(Some("text/n3")), ContentTypeFamily::RdfN3);
        assert_eq!(ContentTypeFamily::classify(Some("application/rdf+xml")), ContentTypeFamily::RdfXml);
        assert_eq!(ContentTypeFamily::classify(Some("application/ld+json")), ContentTypeFamily::RdfJsonLd);
        assert_eq!(ContentTypeFamily::classify(Some("application/xhtml+xml")), ContentTypeFamily::RdfXhtml);
    }

    #[test]
    fn test_json_variants() {
        assert_eq!(ContentTypeFamily::classify(Some("application/json")), ContentTypeFamily::Json);
        assert_eq!(ContentTypeFamily::classify(Some("application/geo+json")), ContentTypeFamily::Json);
    }

    #[test]
    fn test_parameters_and_case_ignored() {
        assert_eq!(
            ContentTypeFamily::classify(Some("Text/HTML; charset=utf-8")),
            ContentTypeFamily::CompositeHtml
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(ContentTypeFamily::classify(Some("text/plain")), ContentTypeFamily::None);
        assert_eq!(ContentTypeFamily::classify(Some("")), ContentTypeFamily::None);
        assert_eq!(ContentTypeFamily::classify(None), ContentTypeFamily::None);
    }

    #[test]
    fn test_compactable_subset() {
        let compactable: Vec<_> = [
            "text/turtle",
            "text/n3",
            "application/ld+json",
            "application/rdf+xml",
            "application/xhtml+xml",
            "application/json",
            "text/html",
            "text/plain",
        ]
        .iter()
        .filter(|ct| ContentTypeFamily::classify(Some(**ct)).is_compactable())
        .copied()
        .collect();
        assert_eq!(compactable, vec!["text/turtle", "text/n3", "application/ld+json"]);
    }

    #[test]
    fn test_rdf_media_type() {
        assert_eq!(ContentTypeFamily::RdfN3.rdf_media_type(), Some("text/n3"));
        assert_eq!(ContentTypeFamily::Json.rdf_media_type(), None);
        assert!(!ContentTypeFamily::CompositeHtml.is_rdf());
    }
}
