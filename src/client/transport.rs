//! The network seam the editor depends on.

use crate::error::Result;
use crate::types::{WebRequest, WebResponse};
use async_trait::async_trait;

/// Abstraction for web operations on a single resource.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and `Err(EditorError::Transport { .. })` when no
/// response was obtained at all.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Perform `request` against `uri`.
    async fn web_operation(&self, uri: &str, request: WebRequest) -> Result<WebResponse>;
}

