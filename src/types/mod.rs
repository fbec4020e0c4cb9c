//! Request, response and metadata types shared by the transport and the editor.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WebRequest`] | Method, body, content type and conditional headers for one operation |
//! | [`WebResponse`] | Status, headers and optional body returned by a [`Transport`](crate::client::Transport) |
//! | [`ResourceMetadata`] | Content type, allowed methods and entity tag of a resource |

mod metadata;
mod request;
mod response;

pub use metadata::ResourceMetadata;
pub use request::WebRequest;
pub use response::WebResponse;
