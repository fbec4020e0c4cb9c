//! Parsed statements and per-host session state.
//!
//! [`Graph`] keeps every statement tagged with the document it was read from.
//! [`SessionContext`] wraps the graph with the request cache and the
//! single-flight save guard, and is passed explicitly to each component.

mod graph;
mod session;

pub use graph::{vocab, Graph, Statement, Term};
pub use session::{SaveGuard, SessionContext};
