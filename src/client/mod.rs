//! Network access for the editor.
//!
//! The editor only ever talks to the network through the [`Transport`]
//! trait, so hosts can plug in their own fetch layer. [`HttpClient`] is the
//! `reqwest` implementation used by default.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── transport - Transport trait
//! ├── fetch     - HttpClient (reqwest)
//! ├── config    - ClientConfig
//! └── utils     - status checks, backoff
//! ```
//!
//! # Examples
//!
//! ```
//! use source_editor::client::{exponential_backoff, ClientConfig, HttpClient};
//! use std::time::Duration;
//!
//! let client = HttpClient::with_config(ClientConfig {
//!     max_retries: 5,
//!     retry_delay_ms: 200,
//!     ..Default::default()
//! }).unwrap();
//! assert_eq!(client.config().max_retries, 5);
//!
//! assert_eq!(exponential_backoff(2, 100), Duration::from_millis(400));
//! ```

mod config;
mod fetch;
mod transport;
mod utils;

pub use config::ClientConfig;
pub use fetch::HttpClient;
pub use transport::Transport;
pub use utils::{check_status, exponential_backoff};
