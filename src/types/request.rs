//! Parameters for a single web operation.

use crate::protocol::headers;
use bytes::Bytes;
use http::Method;
use std::collections::BTreeMap;

/// A request handed to a [`Transport`](crate::client::Transport).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebRequest {
    pub method: Method,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    /// Extra headers, keys lower-cased
    pub headers: BTreeMap<String, String>,
}

impl Default for WebRequest {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            content_type: None,
            headers: BTreeMap::new(),
        }
    }
}

impl WebRequest {
    #[inline]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn head() -> Self {
        Self::new(Method::HEAD)
    }

    /// A full replacement of the resource body.
    pub fn put(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            body: Some(data.into()),
            content_type: Some(content_type.into()),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Make the request conditional on the resource still carrying `etag`.
    pub fn with_if_match(self, etag: impl Into<String>) -> Self {
        self.with_header(headers::IF_MATCH, etag)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The precondition entity tag, if any.
    pub fn if_match(&self) -> Option<&str> {
        self.header(headers::IF_MATCH)
    }

    pub fn body_str(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}
