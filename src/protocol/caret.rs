//! Mapping parser positions to caret offsets in the edit buffer.
//!
//! Offsets count characters, not bytes, since that is what text surfaces use
//! for selection ranges.

use crate::error::{Character, SourcePosition};

/// Character offset at which `line` (zero-based) starts.
///
/// Lines past the end of the text start at the end of the text.
pub fn line_start(text: &str, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut newlines = 0;
    for (offset, ch) in text.chars().enumerate() {
        if ch == '\n' {
            newlines += 1;
            if newlines == line {
                return offset + 1;
            }
        }
    }
    text.chars().count()
}

/// Character offset of the newline ending `line`, or the text length for the last line.
pub fn line_end(text: &str, line: usize) -> usize {
    let mut current = 0;
    for (offset, ch) in text.chars().enumerate() {
        if ch == '\n' {
            if current == line {
                return offset;
            }
            current += 1;
        }
    }
    text.chars().count()
}

/// Caret offset for a reported failure position.
///
/// A column is taken relative to the start of its line. The
/// [`Character::BeforeLine`] marker moves to the following line first, so the
/// caret lands at the start of `line + 1`. The result never exceeds the text
/// length.
///
/// # Examples
///
/// ```
/// use source_editor::protocol::caret_offset;
/// use source_editor::{Character, SourcePosition};
///
/// let text = "ab\ncd\nef";
/// let at = |line, character| SourcePosition { line, character };
///
/// assert_eq!(caret_offset(text, at(Some(1), Character::Column(1))), 4);
/// assert_eq!(caret_offset(text, at(Some(0), Character::BeforeLine)), 3);
/// assert_eq!(caret_offset(text, at(None, Character::Column(99))), 8);
/// ```
pub fn caret_offset(text: &str, position: SourcePosition) -> usize {
    let len = text.chars().count();
    let offset = match position.character {
        Character::Column(column) => line_start(text, position.line.unwrap_or(0)) + column,
        Character::BeforeLine => match position.line {
            Some(line) => line_start(text, line + 1),
            None => 0,
        },
    };
    offset.min(len)
}
