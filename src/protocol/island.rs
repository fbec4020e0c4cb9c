//! Extraction of structured data islands from HTML documents.
//!
//! An HTML page may embed a structured-data block such as
//!
//! ```html
//! <script type="text/turtle">
//!   <#me> a <http://xmlns.com/foaf/0.1/Person> .
//! </script>
//! ```
//!
//! [`extract_data_island`] finds the first such block whose declared type is
//! an RDF serialization so it can be validated as a standalone document.

use super::{headers::media_type, ContentTypeFamily};
use regex::Regex;
use std::sync::OnceLock;

/// Serializations recognised inside `<script>` blocks, in lookup order.
pub const ISLAND_TYPES: [&str; 4] = [
    "text/turtle",
    "text/n3",
    "application/ld+json",
    "application/rdf+xml",
];

/// A structured-data block found inside an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIsland {
    /// Inner text of the block, tags stripped
    pub text: String,
    /// Declared media type of the block
    pub content_type: &'static str,
    /// Zero-based line of the document on which `text` starts
    pub start_line: usize,
    /// Zero-based character column on `start_line` at which `text` starts
    pub start_column: usize,
}

impl DataIsland {
    pub fn family(&self) -> ContentTypeFamily {
        ContentTypeFamily::classify(Some(self.content_type))
    }
}

fn script_start() -> &'static Regex {
    static SCRIPT_START: OnceLock<Regex> = OnceLock::new();
    SCRIPT_START.get_or_init(|| Regex::new(r"(?i)<script").expect("static regex is valid"))
}

fn script_end() -> &'static Regex {
    static SCRIPT_END: OnceLock<Regex> = OnceLock::new();
    SCRIPT_END.get_or_init(|| Regex::new(r"(?i)</script").expect("static regex is valid"))
}

fn open_tag() -> &'static Regex {
    static OPEN_TAG: OnceLock<Regex> = OnceLock::new();
    OPEN_TAG.get_or_init(|| {
        Regex::new(r"(?is)^<script\b([^>]*)>").expect("static regex is valid")
    })
}

fn type_attribute() -> &'static Regex {
    static TYPE_ATTR: OnceLock<Regex> = OnceLock::new();
    TYPE_ATTR.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)type\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("static regex is valid")
    })
}

/// Find the first embedded block declared as a recognised RDF serialization.
///
/// Returns `None` when the document carries no such block.
///
/// # Examples
///
/// ```
/// use source_editor::protocol::extract_data_island;
///
/// let html = r##"<html><script src="app.js"></script>
/// <script type="application/ld+json">{"@id": "#me"}</script></html>"##;
///
/// let island = extract_data_island(html).unwrap();
/// assert_eq!(island.content_type, "application/ld+json");
/// assert_eq!(island.text, r##"{"@id": "#me"}"##);
///
/// assert!(extract_data_island("<p>no data</p>").is_none());
/// ```
pub fn extract_data_island(body: &str) -> Option<DataIsland> {
    let mut segment_start = 0;
    let mut segments: Vec<(usize, usize)> = script_end()
        .find_iter(body)
        .map(|close| {
            let segment = (segment_start, close.start());
            segment_start = close.end();
            segment
        })
        .collect();
    segments.push((segment_start, body.len()));

    segments
        .into_iter()
        .find_map(|(from, to)| island_in(body, from, &body[from..to]))
}

/// The island opened in `candidate`, which starts at byte `from` of `body`.
fn island_in(body: &str, from: usize, candidate: &str) -> Option<DataIsland> {
    let start = script_start().find(candidate)?.start();
    let fragment = &candidate[start..];
    let open = open_tag().captures(fragment)?;
    let attributes = open.get(1).map_or("", |m| m.as_str());
    let declared = declared_type(attributes)?;
    let content_type = ISLAND_TYPES.iter().copied().find(|t| *t == declared)?;
    let inner_start = open.get(0).map_or(0, |m| m.end());

    let preceding = &body[..from + start + inner_start];
    let start_line = preceding.matches('\n').count();
    let start_column = preceding
        .rsplit('\n')
        .next()
        .map_or(0, |line| line.chars().count());

    Some(DataIsland {
        text: fragment[inner_start..].to_string(),
        content_type,
        start_line,
        start_column,
    })
}

fn declared_type(attributes: &str) -> Option<String> {
    let captures = type_attribute().captures(attributes)?;
    let value = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))?;
    Some(media_type(value.as_str()))
}
