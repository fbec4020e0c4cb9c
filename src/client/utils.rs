//! Utility functions for the HTTP transport and the persistence layer.
//!
//! - Status classification of responses
//! - Retry delays with exponential backoff

use crate::error::{EditorError, Result};
use crate::types::WebResponse;
use http::Method;
use std::time::Duration;

/// Turn a non-success response into the matching error.
///
/// A 412 answering a `PUT` becomes [`EditorError::Conflict`]; every other
/// non-success status is reported with the method that produced it.
///
/// # Examples
///
/// ```
/// use source_editor::client::check_status;
/// use source_editor::WebResponse;
/// use http::Method;
///
/// assert!(check_status(&Method::GET, &WebResponse::new(200, "ok")).is_ok());
/// assert!(check_status(&Method::PUT, &WebResponse::new(412, "")).unwrap_err().is_conflict());
/// ```
pub fn check_status(method: &Method, response: &WebResponse) -> Result<()> {
    if response.ok() {
        return Ok(());
    }
    tracing::warn!("HTTP error on {}! Status: {}", method, response.status);
    Err(EditorError::from_status(method.clone(), response.status))
}

/// Exponential backoff delay calculation
pub fn exponential_backoff(attempt: u32, base_ms: u64) -> Duration {
    let delay_ms = base_ms.saturating_mul(2_u64.pow(attempt.min(10)));
    Duration::from_millis(delay_ms)
}
