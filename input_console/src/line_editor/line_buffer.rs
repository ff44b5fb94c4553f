// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::NULL_CHAR;

/// The characters typed since the last commit. The cursor is always at the end, so the
/// only edits are appending and removing the last character.
///
/// Spaces are stored as typed. Collapsing runs of spaces only happens at render time, see
/// [`crate::colorize_input_line()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    content: String,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// [`NULL_CHAR`] is the "no character" value of named keys, and is ignored.
    pub fn append(&mut self, ch: char) {
        if ch != NULL_CHAR {
            self.content.push(ch);
        }
    }

    /// Same as `append(' ')`. Space arrives from the terminal as a named key.
    pub fn append_space(&mut self) { self.content.push(' '); }

    /// Returns `true` if a character was removed. On an empty buffer this does nothing
    /// and returns `false`.
    pub fn backspace(&mut self) -> bool { self.content.pop().is_some() }

    pub fn clear(&mut self) { self.content.clear(); }

    /// The committed form of the line, with trailing `\r` and `\n` removed.
    #[must_use]
    pub fn snapshot(&self) -> String {
        self.content.trim_end_matches(['\r', '\n']).to_string()
    }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.content }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    /// Length in chars, not bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.content.chars().count() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    enum Edit {
        Type(char),
        Backspace,
    }

    fn fold(edits: &[Edit]) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        for edit in edits {
            match edit {
                Edit::Type(ch) => buffer.append(*ch),
                Edit::Backspace => {
                    buffer.backspace();
                }
            }
        }
        buffer
    }

    #[test]
    fn test_buffer_is_fold_of_edits() {
        use Edit::{Backspace, Type};

        let buffer = fold(&[Type('a'), Type('b'), Backspace, Type('c'), Type('d')]);
        assert_eq!(buffer.as_str(), "acd");

        let buffer = fold(&[Type('x'), Backspace, Backspace, Type('y')]);
        assert_eq!(buffer.as_str(), "y");

        let buffer = fold(&[Type('é'), Type('ß'), Backspace]);
        assert_eq!(buffer.as_str(), "é");
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = LineBuffer::new();
        assert!(!buffer.backspace());
        assert_eq!(buffer, LineBuffer::new());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_null_char_is_never_appended() {
        let mut buffer = LineBuffer::new();
        buffer.append(NULL_CHAR);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_spaces_are_stored_as_typed() {
        let mut buffer = LineBuffer::new();
        buffer.append('a');
        buffer.append_space();
        buffer.append_space();
        buffer.append(' ');
        assert_eq!(buffer.as_str(), "a   ");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buffer = LineBuffer::new();
        buffer.append('z');
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.clear();
        assert_eq!(buffer, LineBuffer::new());
    }

    #[test]
    fn test_snapshot_strips_trailing_line_endings() {
        let mut buffer = LineBuffer::new();
        for ch in "add 1\r\n".chars() {
            buffer.append(ch);
        }
        assert_eq!(buffer.snapshot(), "add 1");
        // The buffer itself is untouched.
        assert_eq!(buffer.len(), 7);
    }
}
