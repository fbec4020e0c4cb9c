//! HTTP header names and value parsing used by the editor.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Content-Type | media type with optional parameters | `text/turtle; charset=utf-8` |
//! | Allow | comma-separated methods | `GET, HEAD, PUT` |
//! | ETag | opaque quoted string, optionally weak | `"abc"`, `W/"abc"` |
//! | If-Match | entity tag copied from ETag | `"abc"` |
//!
//! # Examples
//!
//! ```
//! use source_editor::protocol::{media_type, parse_allow};
//!
//! assert_eq!(media_type("text/turtle; charset=utf-8"), "text/turtle");
//! assert_eq!(parse_allow("GET, PUT").len(), 2);
//! ```

use http::Method;

/// `content-type`
pub const CONTENT_TYPE: &str = "content-type";
/// `allow`
pub const ALLOW: &str = "allow";
/// `etag`
pub const ETAG: &str = "etag";
/// `if-match`
pub const IF_MATCH: &str = "if-match";

/// Strip parameters from a content type.
///
/// Returns the part before the first `;`, trimmed and lower-cased.
///
/// # Examples
///
/// ```
/// use source_editor::protocol::media_type;
///
/// assert_eq!(media_type("Text/Turtle;charset=UTF-8"), "text/turtle");
/// assert_eq!(media_type("application/json"), "application/json");
/// assert_eq!(media_type(""), "");
/// ```
pub fn media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Parse an `Allow` header into methods.
///
/// Unknown tokens are kept as extension methods; empty entries are skipped.
pub fn parse_allow(value: &str) -> Vec<Method> {
    value
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .filter_map(|m| Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
        .collect()
}

/// Format methods as an `Allow` header value.
pub fn format_allow(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether an `If-Match` value is satisfied by the current entity tag.
///
/// `*` matches any existing representation. Weak tags never match, since
/// `If-Match` requires strong comparison.
pub fn if_match_satisfied(if_match: &str, current: &str) -> bool {
    if_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || (!candidate.starts_with("W/") && candidate == current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_strips_parameters() {
        assert_eq!(media_type("text/turtle;charset=utf-8"), "text/turtle");
        assert_eq!(media_type(" application/ld+json ; profile=x"), "application/ld+json");
    }

    #[test]
    fn test_parse_allow() {
        let methods = parse_allow("GET, HEAD, PUT");
        assert_eq!(methods, vec![Method::GET, Method::HEAD, Method::PUT]);
    }

    #[test]
    fn test_parse_allow_lowercase_and_gaps() {
        let methods = parse_allow("get,, put ");
        assert_eq!(methods, vec![Method::GET, Method::PUT]);
    }

    #[test]
    fn test_parse_allow_empty() {
        assert!(parse_allow("").is_empty());
    }

    #[test]
    fn test_format_allow() {
        assert_eq!(format_allow(&[Method::GET, Method::PUT]), "GET, PUT");
    }

    #[test]
    fn test_if_match() {
        assert!(if_match_satisfied("\"E1\"", "\"E1\""));
        assert!(if_match_satisfied("\"E0\", \"E1\"", "\"E1\""));
        assert!(if_match_satisfied("*", "\"E9\""));
        assert!(!if_match_satisfied("\"E1\"", "\"E2\""));
        assert!(!if_match_satisfied("W/\"E1\"", "W/\"E1\""));
    }
}
