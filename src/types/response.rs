//! HTTP response as seen by the editor.

use crate::protocol::headers;
use bytes::Bytes;
use std::collections::BTreeMap;

/// HTTP response returned by a [`Transport`](crate::client::Transport).
///
/// `body` is `None` when the transport exposed no text at all, which the
/// editor treats differently from an answer it can display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Bytes>,
}

impl WebResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        WebResponse {
            status,
            headers: BTreeMap::new(),
            body: Some(body.into()),
        }
    }

    /// A response with no body at all.
    pub fn empty(status: u16) -> Self {
        WebResponse {
            status,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(headers::CONTENT_TYPE).filter(|v| !v.is_empty())
    }

    pub fn allow(&self) -> Option<&str> {
        self.header(headers::ALLOW)
    }

    pub fn etag(&self) -> Option<&str> {
        self.header(headers::ETAG)
    }

    /// Body decoded as UTF-8, if there is one.
    pub fn response_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    #[inline]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Default for WebResponse {
    fn default() -> Self {
        WebResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: None,
        }
    }
}
