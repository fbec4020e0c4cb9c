//! Error types for source editing operations.
//!
//! Every failure the editor can hit while loading, validating, compacting or
//! saving a resource is an [`EditorError`]. The [`Result`] alias is the
//! shorthand used throughout the crate.
//!
//! # Error Categories
//!
//! | Category | Variants | Session effect |
//! |----------|----------|----------------|
//! | Load | `Status` (GET), `Transport` (GET), `MissingBody` | enters `broken` |
//! | Type | `UndeterminedType` | enters `broken` |
//! | Validation | `Syntax`, `SemanticValidation` | stays `edited`, buffer flagged |
//! | Save | `Conflict`, `Status` (PUT), `Transport` (PUT), `SaveInFlight` | stays `edited` |
//! | Refresh | `Refresh` | write kept, stays `edited` |
//!
//! # Source Positions
//!
//! Parsers report failures as [`SyntaxError`] values that may wrap an
//! underlying cause. [`EditorError::source_position()`] walks that chain and
//! returns the first position found, which the editor uses to move the caret.
//!
//! ```
//! use source_editor::{EditorError, SyntaxError};
//!
//! let inner = SyntaxError::new("expected '.'").at_line(2).at_column(4);
//! let outer = SyntaxError::new("Turtle parse failed").caused_by(inner);
//! let err = EditorError::from(outer);
//!
//! let pos = err.source_position().unwrap();
//! assert_eq!(pos.line, Some(2));
//! ```

use crate::editor::EditorState;
use std::fmt;
use thiserror::Error;

/// Result type for source editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur while editing a remote resource.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EditorError {
    /// The server answered with a non-success status.
    #[error("HTTP error on {method}! Status: {status}")]
    Status {
        /// HTTP method of the failed request
        method: http::Method,
        /// Status code returned by the server
        status: u16,
    },

    /// The write was rejected because the resource changed since it was read (HTTP 412).
    #[error("Error: File changed by someone else")]
    Conflict,

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Transport error on {method}: {message}")]
    Transport {
        /// HTTP method of the failed request
        method: http::Method,
        /// Message reported by the transport
        message: String,
    },

    /// A read succeeded but carried no text.
    #[error("No text in response object")]
    MissingBody,

    /// Neither the response headers nor the session cache named a content type.
    #[error("Error: No content-type available!")]
    UndeterminedType,

    /// The buffer does not parse as its declared content type.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The buffer parses but parsing changed its meaning.
    #[error("Invalid JSON-LD: {0}")]
    SemanticValidation(String),

    /// The write completed but re-reading its metadata failed.
    #[error("Saved, but refreshing metadata failed: {0}")]
    Refresh(#[source] Box<EditorError>),

    /// Another save for the same resource has not finished yet.
    #[error("A save for {0} is already in progress")]
    SaveInFlight(String),

    /// The requested action is not allowed from the current editor state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// State the editor was in
        state: EditorState,
        /// Action that was refused
        action: &'static str,
    },

    /// The resource identity is not an absolute URI.
    #[error("Invalid resource URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}

impl EditorError {
    /// Build the error for a non-success response to `method`.
    ///
    /// A 412 on a write is reported as [`EditorError::Conflict`].
    pub fn from_status(method: http::Method, status: u16) -> Self {
        if status == 412 && method == http::Method::PUT {
            EditorError::Conflict
        } else {
            EditorError::Status { method, status }
        }
    }

    /// Check if this error is a transient transport failure worth retrying.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            EditorError::Transport { message, .. } => {
                let message = message.to_lowercase();
                message.contains("timed out")
                    || message.contains("timeout")
                    || message.contains("connect")
                    || message.contains("reset")
            }
            _ => false,
        }
    }

    /// Check if this is an optimistic-concurrency conflict.
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, EditorError::Conflict)
    }

    /// Check if the error rejects the buffer contents rather than the network exchange.
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::Syntax(_) | EditorError::SemanticValidation(_)
        )
    }

    /// Check if this error makes the editing session unusable.
    #[inline]
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        match self {
            EditorError::Status { method, .. } | EditorError::Transport { method, .. } => {
                *method == http::Method::GET
            }
            EditorError::MissingBody | EditorError::UndeterminedType => true,
            _ => false,
        }
    }

    /// Find the first position reported anywhere in the cause chain.
    pub fn source_position(&self) -> Option<SourcePosition> {
        match self {
            EditorError::Syntax(err) => err.position(),
            EditorError::Refresh(inner) => inner.source_position(),
            _ => None,
        }
    }
}

/// Column reported by a parser for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Character {
    /// Zero-based column within the reported line.
    Column(usize),
    /// The failure sits on the boundary just before the reported line.
    BeforeLine,
}

/// Position of a syntax failure inside the buffer.
///
/// `line` is zero-based. When it is absent the column is taken relative to the
/// start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Zero-based line number, if the parser reported one
    pub line: Option<usize>,
    /// Column or boundary marker
    pub character: Character,
}

/// A parse failure, optionally wrapping the failure that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human readable description
    pub message: String,
    /// Zero-based line hint
    pub line: Option<usize>,
    /// Column hint
    pub character: Option<Character>,
    /// Underlying failure
    pub cause: Option<Box<SyntaxError>>,
}

impl SyntaxError {
    /// Create an error with no position information.
    pub fn new(message: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
            line: None,
            character: None,
            cause: None,
        }
    }

    /// Attach a zero-based line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a zero-based column.
    pub fn at_column(mut self, column: usize) -> Self {
        self.character = Some(Character::Column(column));
        self
    }

    /// Mark the failure as sitting just before the reported line.
    pub fn before_line(mut self) -> Self {
        self.character = Some(Character::BeforeLine);
        self
    }

    /// Wrap an underlying failure.
    pub fn caused_by(mut self, cause: SyntaxError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Re-anchor every position along the chain to a text embedded in a larger
    /// document, starting at zero-based `line` and `column` of that document.
    ///
    /// Columns only shift on the embedded text's first line.
    pub fn embedded_at(mut self, line: usize, column: usize) -> Self {
        match self.character {
            Some(Character::Column(c)) => {
                let relative = self.line.unwrap_or(0);
                if relative == 0 {
                    self.character = Some(Character::Column(c + column));
                }
                self.line = Some(relative + line);
            }
            Some(Character::BeforeLine) | None => {
                self.line = self.line.map(|relative| relative + line);
            }
        }
        self.cause = self
            .cause
            .map(|cause| Box::new(cause.embedded_at(line, column)));
        self
    }

    /// Iterate over this error followed by each of its causes.
    pub fn chain(&self) -> impl Iterator<Item = &SyntaxError> {
        std::iter::successors(Some(self), |err| err.cause.as_deref())
    }

    /// First position found along the cause chain.
    ///
    /// The line hint is read from the same link that carries the column.
    pub fn position(&self) -> Option<SourcePosition> {
        self.chain().find_map(|err| {
            err.character.map(|character| SourcePosition {
                line: err.line,
                character,
            })
        })
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for SyntaxError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json counts lines and columns from one.
        let line = err.line().saturating_sub(1);
        let column = err.column().saturating_sub(1);
        SyntaxError::new(err.to_string())
            .at_line(line)
            .at_column(column)
    }
}
