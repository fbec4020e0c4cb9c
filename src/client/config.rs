//! Configuration for the HTTP transport.
//!
//! The editor has no timeout logic of its own; every timeout and retry policy
//! lives here and is applied by [`HttpClient`](super::HttpClient).
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `max_retries` | 3 | Retries for transient transport failures |
//! | `retry_delay_ms` | 1000 | Base delay between retries |
//! | `connect_timeout_secs` | 30 | Connection timeout |
//! | `request_timeout_ms` | 30000 | Whole-request timeout |
//! | `enable_logging` | false | Log every request and response status |
//! | `user_agent` | crate name/version | `User-Agent` header |
//!
//! # Examples
//!
//! ```
//! use source_editor::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     max_retries: 5,
//!     ..Default::default()
//! };
//! assert_eq!(config.retry_delay_ms, 1000);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for [`HttpClient`](super::HttpClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum retries for transient transport failures.
    ///
    /// Non-success statuses are answers, not failures, and are never retried.
    pub max_retries: u32,

    /// Base retry delay in milliseconds.
    ///
    /// The actual delay uses exponential backoff: `delay = base * 2^attempt`.
    pub retry_delay_ms: u64,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Log request/response details using the `tracing` crate.
    pub enable_logging: bool,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            max_retries: 3,
            retry_delay_ms: 1000,
            connect_timeout_secs: 30,
            request_timeout_ms: 30000,
            enable_logging: false,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
